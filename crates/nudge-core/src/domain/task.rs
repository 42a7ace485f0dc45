//! Task record: metadata the CRUD collaborator persists and this core scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TaskId, UserId};
use super::window::ReminderWindow;

/// Task priority. Not consulted by the scheduler; carried so this core never
/// corrupts it when writing records back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A user-owned task.
///
/// Write discipline for `notified`:
/// - the completion guard sets it to `true` after a confirmed delivery,
/// - the CRUD side resets it to `false` whenever `due_at` changes
///   (see [`TaskRecord::reschedule`]),
/// - nothing else touches it.
///
/// `notified == true` therefore implies a reminder was accepted by the
/// transport at least once for the `due_at` in effect at delivery time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub owner: UserId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,

    /// Absent means the task never triggers a reminder.
    pub due_at: Option<DateTime<Utc>>,

    pub is_completed: bool,
    pub notified: bool,
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    pub fn new(
        id: TaskId,
        owner: UserId,
        title: impl Into<String>,
        due_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_at,
            is_completed: false,
            notified: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Toggle completion, maintaining `completed_at` on both transitions.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.is_completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
        self.updated_at = now;
    }

    /// Change the deadline. Resets `notified` so the new deadline becomes
    /// eligible again; this is the CRUD side of the guard contract.
    pub fn reschedule(&mut self, due_at: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        self.due_at = due_at;
        self.notified = false;
        self.updated_at = now;
    }

    /// Set the guard flag. Only the completion guard calls this.
    pub fn mark_notified(&mut self, now: DateTime<Utc>) {
        self.notified = true;
        self.updated_at = now;
    }

    /// A task is a candidate iff it is open, unnotified, and due inside the
    /// window.
    pub fn is_reminder_candidate(&self, window: &ReminderWindow) -> bool {
        if self.is_completed || self.notified {
            return false;
        }
        match self.due_at {
            Some(due) => window.contains(due),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use ulid::Ulid;

    fn record(due_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> TaskRecord {
        TaskRecord::new(
            TaskId::from_ulid(Ulid::new()),
            UserId::from_ulid(Ulid::new()),
            "write report",
            due_at,
            now,
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn completing_sets_and_reopening_clears_completed_at() {
        let now = t0();
        let mut task = record(None, now);

        task.set_completed(true, now + Duration::minutes(5));
        assert!(task.is_completed);
        assert_eq!(task.completed_at, Some(now + Duration::minutes(5)));

        task.set_completed(false, now + Duration::minutes(6));
        assert!(!task.is_completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn reschedule_resets_the_notified_flag() {
        let now = t0();
        let mut task = record(Some(now + Duration::minutes(10)), now);
        task.mark_notified(now);
        assert!(task.notified);

        task.reschedule(Some(now + Duration::hours(1)), now);
        assert!(!task.notified);
        assert_eq!(task.due_at, Some(now + Duration::hours(1)));
    }

    #[test]
    fn candidacy_requires_open_unnotified_and_in_window() {
        let now = t0();
        let window = ReminderWindow::around(now, Duration::minutes(10), Duration::minutes(1));

        let due_soon = Some(now + Duration::minutes(10));
        let task = record(due_soon, now);
        assert!(task.is_reminder_candidate(&window));

        let mut completed = record(due_soon, now);
        completed.set_completed(true, now);
        assert!(!completed.is_reminder_candidate(&window));

        let mut notified = record(due_soon, now);
        notified.mark_notified(now);
        assert!(!notified.is_reminder_candidate(&window));

        let no_due = record(None, now);
        assert!(!no_due.is_reminder_candidate(&window));

        let far_out = record(Some(now + Duration::hours(2)), now);
        assert!(!far_out.is_reminder_candidate(&window));
    }
}
