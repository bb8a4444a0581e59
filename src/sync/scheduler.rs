//! Sync scheduler — periodic and manual flushing of pending changes.
//!
//! Both triggers converge on `flush`. The only timer state is the next due
//! instant, which doubles as the on/off handle: `None` means disarmed.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::engine::Canvas;

use super::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Timer,
    Manual,
    Shutdown,
}

impl Trigger {
    fn label(self) -> &'static str {
        match self {
            Trigger::Timer => "timer",
            Trigger::Manual => "manual",
            Trigger::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was pending.
    Skipped,
    Delivered { groups: usize, cells: usize },
    /// The transport rejected the batch. It is not restored.
    Lost { groups: usize, cells: usize },
}

pub struct SyncScheduler {
    interval: Duration,
    next_due: Option<Instant>,
    batches_delivered: u64,
    cells_delivered: u64,
    last_outcome: Option<FlushOutcome>,
}

impl SyncScheduler {
    pub fn new(interval: Duration) -> Self {
        SyncScheduler {
            interval,
            next_due: None,
            batches_delivered: 0,
            cells_delivered: 0,
            last_outcome: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// How long the caller may wait before the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Fire the timer trigger if it is due, then re-arm it.
    pub fn tick(
        &mut self,
        now: Instant,
        canvas: &mut Canvas,
        transport: &mut dyn Transport,
    ) -> Option<FlushOutcome> {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                Some(self.flush(Trigger::Timer, canvas, transport))
            }
            _ => None,
        }
    }

    /// Drain the pending set and hand it to the transport, once.
    pub fn flush(
        &mut self,
        trigger: Trigger,
        canvas: &mut Canvas,
        transport: &mut dyn Transport,
    ) -> FlushOutcome {
        if !canvas.has_pending() {
            debug!(trigger = trigger.label(), "nothing pending, flush skipped");
            return FlushOutcome::Skipped;
        }

        let batch = canvas.drain_pending();
        let groups = batch.group_count();
        let cells = batch.cell_count();

        let outcome = match transport.send(&batch) {
            Ok(()) => {
                self.batches_delivered += 1;
                self.cells_delivered += cells as u64;
                info!(trigger = trigger.label(), groups, cells, "flushed pending changes");
                FlushOutcome::Delivered { groups, cells }
            }
            Err(e) => {
                warn!(trigger = trigger.label(), groups, cells, error = %e, "batch lost");
                FlushOutcome::Lost { groups, cells }
            }
        };
        self.last_outcome = Some(outcome);
        outcome
    }

    pub fn batches_delivered(&self) -> u64 {
        self.batches_delivered
    }

    pub fn cells_delivered(&self) -> u64 {
        self.cells_delivered
    }

    /// Outcome of the most recent flush that had something to send.
    pub fn last_outcome(&self) -> Option<FlushOutcome> {
        self.last_outcome
    }
}
