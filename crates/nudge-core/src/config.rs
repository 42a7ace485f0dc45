//! Scheduler configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Reminder scheduler knobs, all in whole seconds.
///
/// Defaults mirror the classic policy: scan every minute, aim for a reminder
/// ten minutes ahead of the deadline, with a one-minute margin on each side
/// of the window (the "9 to 11 minutes out" query).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Seconds between scans.
    pub scan_interval_secs: u64,

    /// Target seconds before due time at which a reminder should arrive.
    pub lead_time_secs: u64,

    /// Half-width of the scan window, in seconds.
    pub window_margin_secs: u64,

    /// Upper bound on a single send attempt, in seconds.
    pub dispatch_timeout_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: 60,
            lead_time_secs: 600,
            window_margin_secs: 60,
            dispatch_timeout_secs: 30,
        }
    }
}

/// Largest accepted value for any seconds field: one century. Far beyond
/// any sane schedule, and small enough that the arithmetic in `validate`
/// and the `chrono::Duration` conversions below stay exact.
pub const MAX_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("scan_interval_secs must be greater than zero")]
    ZeroScanInterval,

    #[error("dispatch_timeout_secs must be greater than zero")]
    ZeroDispatchTimeout,

    #[error(
        "{field} ({value}) is out of range; values above {max} seconds are not supported",
        max = MAX_SECS
    )]
    SecondsOutOfRange { field: &'static str, value: u64 },

    #[error(
        "window_margin_secs ({margin}) must be at least half of scan_interval_secs ({interval}); \
         a narrower window can let a task slip between two scans"
    )]
    MarginTooNarrow { margin: u64, interval: u64 },

    #[error(
        "lead_time_secs ({lead}) must be at least window_margin_secs ({margin}); \
         otherwise the window starts in the past"
    )]
    LeadShorterThanMargin { lead: u64, margin: u64 },
}

impl ReminderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scan_interval_secs", self.scan_interval_secs),
            ("lead_time_secs", self.lead_time_secs),
            ("window_margin_secs", self.window_margin_secs),
            ("dispatch_timeout_secs", self.dispatch_timeout_secs),
        ] {
            if value > MAX_SECS {
                return Err(ConfigError::SecondsOutOfRange { field, value });
            }
        }
        if self.scan_interval_secs == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }
        if self.dispatch_timeout_secs == 0 {
            return Err(ConfigError::ZeroDispatchTimeout);
        }
        if self.window_margin_secs.saturating_mul(2) < self.scan_interval_secs {
            return Err(ConfigError::MarginTooNarrow {
                margin: self.window_margin_secs,
                interval: self.scan_interval_secs,
            });
        }
        if self.lead_time_secs < self.window_margin_secs {
            return Err(ConfigError::LeadShorterThanMargin {
                lead: self.lead_time_secs,
                margin: self.window_margin_secs,
            });
        }
        Ok(())
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout_secs)
    }

    /// Clamped to [`MAX_SECS`] so the conversion is total; `validate`
    /// rejects anything larger up front.
    pub fn lead_time(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.lead_time_secs.min(MAX_SECS) as i64)
    }

    pub fn window_margin(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.window_margin_secs.min(MAX_SECS) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        let config = ReminderConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.scan_interval(), Duration::from_secs(60));
        assert_eq!(config.lead_time(), chrono::Duration::minutes(10));
        assert_eq!(config.window_margin(), chrono::Duration::minutes(1));
    }

    #[rstest]
    #[case::zero_interval(
        ReminderConfig { scan_interval_secs: 0, ..Default::default() },
        ConfigError::ZeroScanInterval
    )]
    #[case::zero_timeout(
        ReminderConfig { dispatch_timeout_secs: 0, ..Default::default() },
        ConfigError::ZeroDispatchTimeout
    )]
    #[case::margin_too_narrow(
        ReminderConfig { scan_interval_secs: 60, window_margin_secs: 20, ..Default::default() },
        ConfigError::MarginTooNarrow { margin: 20, interval: 60 }
    )]
    #[case::lead_shorter_than_margin(
        ReminderConfig { lead_time_secs: 30, window_margin_secs: 60, ..Default::default() },
        ConfigError::LeadShorterThanMargin { lead: 30, margin: 60 }
    )]
    #[case::lead_out_of_range(
        ReminderConfig { lead_time_secs: u64::MAX, ..Default::default() },
        ConfigError::SecondsOutOfRange { field: "lead_time_secs", value: u64::MAX }
    )]
    #[case::margin_out_of_range(
        ReminderConfig { window_margin_secs: u64::MAX, ..Default::default() },
        ConfigError::SecondsOutOfRange { field: "window_margin_secs", value: u64::MAX }
    )]
    fn invalid_configs_are_rejected(#[case] config: ReminderConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn margin_of_exactly_half_the_interval_is_allowed() {
        let config = ReminderConfig {
            scan_interval_secs: 120,
            window_margin_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn chrono_accessors_are_total_even_for_rejected_values() {
        let config = ReminderConfig {
            lead_time_secs: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.lead_time(), chrono::Duration::seconds(MAX_SECS as i64));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ReminderConfig = serde_json::from_str(r#"{"scan_interval_secs": 30}"#).unwrap();
        assert_eq!(config.scan_interval_secs, 30);
        assert_eq!(config.lead_time_secs, 600);
    }
}
