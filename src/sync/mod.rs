//! Sync — shipping pending changes to the remote collaborator.
//!
//! The serializer turns the pending set into a `Batch`, the scheduler decides
//! when, and the transport decides where.

pub mod scheduler;
pub mod serializer;
pub mod transport;

pub use scheduler::{FlushOutcome, SyncScheduler, Trigger};
pub use transport::{JsonLines, MemoryTransport, Transport, TransportError};
