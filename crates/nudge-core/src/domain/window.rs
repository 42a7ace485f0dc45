//! Reminder window: the due-time interval that qualifies a task this scan.

use chrono::{DateTime, Duration, Utc};

/// Inclusive due-time interval computed from a reference instant.
///
/// Policy: `start = now + lead_time - margin`, `end = now + lead_time + margin`,
/// so a task due at `now + lead_time` sits in the middle of the window. The
/// margin must be at least half the scan interval (enforced by config
/// validation) or a delayed scan can let a task slip between two windows.
///
/// Pure data, deterministic given `now`. The `notified` guard, not this
/// arithmetic, is what caps sends at one when consecutive windows overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReminderWindow {
    /// Window of width `2 * margin` centered on `now + lead_time`.
    pub fn around(now: DateTime<Utc>, lead_time: Duration, margin: Duration) -> Self {
        let center = now + lead_time;
        Self {
            start: center - margin,
            end: center + margin,
        }
    }

    /// Both endpoints are inclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn width(&self) -> Duration {
        self.end - self.start
    }
}
