pub mod config;
mod input;
pub mod state;
mod toolbar;
mod ui;

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::{cursor, event, execute, queue, terminal};
use tracing::info;

use crate::config::{CELL_SIZE, FLUSH_INTERVAL};
use crate::engine::Canvas;
use crate::renderer::terminal::TerminalSurface;
use crate::renderer::Renderer;
use crate::sync::{FlushOutcome, SyncScheduler, Transport, Trigger};

use config::EditorConfig;
use input::Action;
use state::EditorState;
use ui::Layout;

/// Upper bound on one blocking wait when the sync timer is disarmed.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// An interactive drawing session bound to one transport.
pub struct Editor<T: Transport> {
    canvas: Canvas,
    state: EditorState,
    scheduler: SyncScheduler,
    transport: T,
    layout: Layout,
    needs_redraw: Rc<Cell<bool>>,
}

impl<T: Transport> Editor<T> {
    pub fn new(transport: T, config: EditorConfig) -> Self {
        let mut canvas = Canvas::default();
        let needs_redraw = Rc::new(Cell::new(true));
        let flag = Rc::clone(&needs_redraw);
        canvas.subscribe(move |_, _| flag.set(true));

        Editor {
            canvas,
            state: EditorState::new(config),
            scheduler: SyncScheduler::new(FLUSH_INTERVAL),
            transport,
            layout: Layout::new(),
            needs_redraw,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        if !self.layout.fits(term_w, term_h) {
            let (need_w, need_h) = self.layout.required_size();
            bail!("Terminal too small: need {need_w}x{need_h}, have {term_w}x{term_h}");
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        info!(interval_ms = FLUSH_INTERVAL.as_millis() as u64, "drawing session started");

        let result = self.main_loop(&mut stdout);

        let _ = execute!(
            stdout,
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        self.shutdown();
        result
    }

    /// Disarm the timer and ship whatever is still pending.
    fn shutdown(&mut self) {
        self.scheduler.disarm();
        let outcome = self
            .scheduler
            .flush(Trigger::Shutdown, &mut self.canvas, &mut self.transport);
        info!(
            ?outcome,
            batches = self.scheduler.batches_delivered(),
            cells = self.scheduler.cells_delivered(),
            "drawing session ended"
        );
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.scheduler.arm(Instant::now());

        loop {
            if self.needs_redraw.replace(false) {
                self.full_redraw(stdout)?;
            }

            let wait = self
                .scheduler
                .time_until_due(Instant::now())
                .unwrap_or(IDLE_WAIT);

            if event::poll(wait)? {
                let event = event::read()?;
                let action = input::handle_event(&mut self.state, &mut self.canvas, &self.layout, event);

                match action {
                    Action::Continue => {}
                    Action::Redraw => self.needs_redraw.set(true),
                    Action::Flush => {
                        let outcome = self
                            .scheduler
                            .flush(Trigger::Manual, &mut self.canvas, &mut self.transport);
                        self.state.record_flush(outcome);
                        self.needs_redraw.set(true);
                    }
                    Action::Quit => break,
                }
            }

            match self.scheduler.tick(Instant::now(), &mut self.canvas, &mut self.transport) {
                None | Some(FlushOutcome::Skipped) => {}
                Some(outcome) => {
                    self.state.record_flush(outcome);
                    self.needs_redraw.set(true);
                }
            }
        }

        Ok(())
    }

    fn full_redraw(&self, stdout: &mut io::Stdout) -> Result<()> {
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;

        toolbar::render_toolbar(stdout, &self.state)?;

        let (width, height) = self.layout.canvas_pixels();
        let mut surface = TerminalSurface::new(stdout, self.layout.origin(), CELL_SIZE, width, height);
        Renderer::render(&mut surface, self.canvas.snapshot(), CELL_SIZE)?;

        toolbar::render_status(stdout, &self.layout, &self.state, &self.canvas, &self.scheduler)?;

        stdout.flush()?;
        Ok(())
    }
}
