//! nudge-core
//!
//! Core building blocks for the nudge reminder scheduler: a background
//! process that scans user tasks approaching their due time and delivers
//! exactly one notification per task, deduplicated across overlapping scan
//! windows by a persisted guard flag.
//!
//! # Module layout
//! - **domain**: ids, task records, reminder windows, cycle reports
//! - **ports**: abstraction layer (TaskStore, Mailer, Clock, IdGenerator)
//! - **app**: application logic (candidate selection, dispatch, the
//!   scheduler loop)
//! - **impls**: in-memory implementations for development and tests
//! - **config**: scheduler knobs with fail-fast validation

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{Scheduler, SchedulerHandle};
pub use config::{ConfigError, ReminderConfig};
