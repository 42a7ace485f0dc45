//! In-memory task store (development and tests).
//!
//! Stands in for the real persistence engine behind the [`TaskStore`] port.
//! Also carries the CRUD-collaborator surface (`insert`, `set_completed`,
//! `reschedule`, ...) so tests can exercise the contract that due-date edits
//! reset the guard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{ReminderWindow, TaskId, TaskRecord, UserId};
use crate::ports::{Address, Clock, GuardUpdate, StoreError, SystemClock, TaskStore};

struct StoreState {
    tasks: HashMap<TaskId, TaskRecord>,
    addresses: HashMap<UserId, Address>,
    fail_queries: bool,
    fail_guard_updates: bool,
}

pub struct InMemoryTaskStore {
    state: Arc<Mutex<StoreState>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Stamp updates from an injected clock (tests pair this with the same
    /// `FixedClock` the scheduler uses).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                tasks: HashMap::new(),
                addresses: HashMap::new(),
                fail_queries: false,
                fail_guard_updates: false,
            })),
            clock,
        }
    }

    // ---- CRUD-collaborator surface -------------------------------------

    pub async fn insert(&self, task: TaskRecord) {
        let mut state = self.state.lock().await;
        state.tasks.insert(task.id, task);
    }

    pub async fn upsert_address(&self, owner: UserId, address: Address) {
        let mut state = self.state.lock().await;
        state.addresses.insert(owner, address);
    }

    pub async fn get(&self, task: TaskId) -> Option<TaskRecord> {
        let state = self.state.lock().await;
        state.tasks.get(&task).cloned()
    }

    pub async fn list_for_user(&self, owner: UserId) -> Vec<TaskRecord> {
        let state = self.state.lock().await;
        state
            .tasks
            .values()
            .filter(|task| task.owner == owner)
            .cloned()
            .collect()
    }

    pub async fn set_completed(&self, task: TaskId, completed: bool) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let record = state
            .tasks
            .get_mut(&task)
            .ok_or(StoreError::TaskNotFound(task))?;
        record.set_completed(completed, now);
        Ok(())
    }

    /// Due-date edit. Resets the `notified` guard, per the contract with the
    /// scheduler core.
    pub async fn reschedule(
        &self,
        task: TaskId,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let record = state
            .tasks
            .get_mut(&task)
            .ok_or(StoreError::TaskNotFound(task))?;
        record.reschedule(due_at, now);
        Ok(())
    }

    pub async fn remove(&self, task: TaskId) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state
            .tasks
            .remove(&task)
            .map(|_| ())
            .ok_or(StoreError::TaskNotFound(task))
    }

    // ---- fault injection ------------------------------------------------

    /// Make window queries fail until cleared (store-outage simulation).
    pub async fn fail_queries(&self, fail: bool) {
        let mut state = self.state.lock().await;
        state.fail_queries = fail;
    }

    /// Make guard writes fail until cleared. Reads keep working, so a
    /// delivered-but-unguarded task shows up again on the next query.
    pub async fn fail_guard_updates(&self, fail: bool) {
        let mut state = self.state.lock().await;
        state.fail_guard_updates = fail;
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn due_in_window(&self, window: ReminderWindow) -> Result<Vec<TaskRecord>, StoreError> {
        let state = self.state.lock().await;
        if state.fail_queries {
            return Err(StoreError::Unavailable("injected store outage".into()));
        }
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_reminder_candidate(&window))
            .cloned()
            .collect())
    }

    async fn notification_address(&self, owner: UserId) -> Result<Option<Address>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.addresses.get(&owner).cloned())
    }

    async fn mark_notified(&self, task: TaskId) -> Result<GuardUpdate, StoreError> {
        let now = self.clock.now();
        // Single lock acquisition makes check-then-set atomic per record.
        let mut state = self.state.lock().await;
        if state.fail_guard_updates {
            return Err(StoreError::Unavailable("injected guard-write outage".into()));
        }
        let record = state
            .tasks
            .get_mut(&task)
            .ok_or(StoreError::TaskNotFound(task))?;
        if record.notified {
            return Ok(GuardUpdate::AlreadySet);
        }
        record.mark_notified(now);
        Ok(GuardUpdate::Set)
    }
}
