//! Ports - abstraction layer.
//!
//! Each trait here is an interface to an external collaborator (the task
//! store owned by the CRUD side, the mail relay, the wall clock) so the
//! scheduler logic stays testable against in-memory implementations.

pub mod clock;
pub mod id_generator;
pub mod mailer;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::mailer::{Address, MailError, Mailer, ReminderMail};
pub use self::task_store::{GuardUpdate, StoreError, TaskStore};
