//! Candidate selection: the read-only half of a scan.
//!
//! Queries the store for tasks due inside the window and resolves each
//! owner's address. A store failure aborts the whole cycle (the caller logs
//! and the next tick retries); an unresolvable address only drops that one
//! task, which stays a candidate for future scans because its guard was
//! never set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{ReminderWindow, TaskRecord};
use crate::ports::{Address, StoreError, TaskStore};

/// A task eligible for a reminder in the current scan, with its owner's
/// address already resolved.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub task: TaskRecord,
    pub due_at: DateTime<Utc>,
    pub address: Address,
}

/// What one selection pass produced.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub candidates: Vec<Candidate>,
    /// Tasks dropped before dispatch (no resolvable owner address).
    pub skipped: usize,
}

pub struct CandidateSelector {
    store: Arc<dyn TaskStore>,
}

impl CandidateSelector {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Side-effect-free. Ordering of the result is irrelevant; every
    /// candidate is dispatched independently.
    pub async fn select(&self, window: ReminderWindow) -> Result<Selection, StoreError> {
        let tasks = self.store.due_in_window(window).await?;

        let mut selection = Selection::default();
        for task in tasks {
            // The store query already filters on due_at, but the field is
            // optional on the record, so re-check rather than unwrap.
            let Some(due_at) = task.due_at else {
                continue;
            };

            match self.store.notification_address(task.owner).await {
                Ok(Some(address)) => selection.candidates.push(Candidate {
                    task,
                    due_at,
                    address,
                }),
                Ok(None) => {
                    warn!(task_id = %task.id, owner = %task.owner,
                        "skipping reminder: owner has no notification address");
                    selection.skipped += 1;
                }
                Err(err) => {
                    warn!(task_id = %task.id, owner = %task.owner, error = %err,
                        "skipping reminder: address lookup failed");
                    selection.skipped += 1;
                }
            }
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryTaskStore;
    use crate::ports::{FixedClock, IdGenerator, UlidGenerator};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn window_at(now: DateTime<Utc>) -> ReminderWindow {
        ReminderWindow::around(now, Duration::minutes(10), Duration::minutes(1))
    }

    #[tokio::test]
    async fn resolves_addresses_for_in_window_tasks() {
        let now = t0();
        let ids = UlidGenerator::new(FixedClock::new(now));
        let store = Arc::new(InMemoryTaskStore::new());

        let owner = ids.user_id();
        store
            .upsert_address(owner, Address::new("ada@example.com"))
            .await;
        let task = TaskRecord::new(
            ids.task_id(),
            owner,
            "file taxes",
            Some(now + Duration::minutes(10)),
            now,
        );
        store.insert(task.clone()).await;

        let selector = CandidateSelector::new(store);
        let selection = selector.select(window_at(now)).await.unwrap();

        assert_eq!(selection.candidates.len(), 1);
        assert_eq!(selection.skipped, 0);
        let candidate = &selection.candidates[0];
        assert_eq!(candidate.task.id, task.id);
        assert_eq!(candidate.due_at, now + Duration::minutes(10));
        assert_eq!(candidate.address.as_str(), "ada@example.com");
    }

    #[tokio::test]
    async fn unresolved_address_is_a_soft_skip() {
        let now = t0();
        let ids = UlidGenerator::new(FixedClock::new(now));
        let store = Arc::new(InMemoryTaskStore::new());

        // No address registered for this owner.
        let task = TaskRecord::new(
            ids.task_id(),
            ids.user_id(),
            "orphaned task",
            Some(now + Duration::minutes(10)),
            now,
        );
        store.insert(task).await;

        let selector = CandidateSelector::new(store);
        let selection = selector.select(window_at(now)).await.unwrap();

        assert!(selection.candidates.is_empty());
        assert_eq!(selection.skipped, 1);
    }

    #[tokio::test]
    async fn empty_window_is_not_an_error() {
        let store = Arc::new(InMemoryTaskStore::new());
        let selector = CandidateSelector::new(store);

        let selection = selector.select(window_at(t0())).await.unwrap();
        assert!(selection.candidates.is_empty());
        assert_eq!(selection.skipped, 0);
    }

    #[tokio::test]
    async fn store_failure_aborts_selection() {
        let store = Arc::new(InMemoryTaskStore::new());
        store.fail_queries(true).await;

        let selector = CandidateSelector::new(store);
        let err = selector.select(window_at(t0())).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
