//! TaskStore port - the task persistence boundary.
//!
//! The store is owned by the CRUD collaborator; this core only needs a range
//! query over due times, owner address lookup, and one conditional write.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ReminderWindow, TaskId, TaskRecord, UserId};
use crate::ports::mailer::Address;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task store unavailable: {0}")]
    Unavailable(String),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("{0}")]
    Other(String),
}

/// Result of the conditional guard update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardUpdate {
    /// The flag flipped false -> true in this call.
    Set,
    /// The flag was already true: this call lost the race to another scan.
    /// The duplicate send that already happened is a bounded anomaly, not
    /// data corruption.
    AlreadySet,
}

/// Read/write interface over persisted task records.
///
/// `mark_notified` is the single mutation this core performs, and it must be
/// atomic at single-record granularity: "set `notified = true` where
/// `id = task AND notified = false`". That conditional is the only cross-scan
/// ordering point in the whole design.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks with `due_at` inside `window`, not completed, not yet notified.
    ///
    /// Read-only; an empty result is not an error.
    async fn due_in_window(&self, window: ReminderWindow) -> Result<Vec<TaskRecord>, StoreError>;

    /// Resolve an owner's notification address. `Ok(None)` means the owner
    /// exists but has nowhere to be notified.
    async fn notification_address(&self, owner: UserId) -> Result<Option<Address>, StoreError>;

    /// Conditional guard update. Idempotent: a second call on the same task
    /// reports [`GuardUpdate::AlreadySet`] and changes nothing.
    async fn mark_notified(&self, task: TaskId) -> Result<GuardUpdate, StoreError>;
}
