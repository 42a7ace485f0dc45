//! Impls - port implementations for development and tests.
//!
//! Production adapters (a SQL-backed store, an SMTP mailer) live outside this
//! crate; everything here is in-memory.

pub mod memory_store;
pub mod recording_mailer;

pub use self::memory_store::InMemoryTaskStore;
pub use self::recording_mailer::RecordingMailer;
