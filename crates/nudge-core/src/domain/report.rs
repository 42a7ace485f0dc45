//! Per-cycle observability: delivery results and scan counters.

use serde::{Deserialize, Serialize};

/// Outcome of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The transport accepted the message.
    Delivered,
    /// The attempt failed or timed out; the task stays a candidate.
    Failed(String),
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered)
    }
}

/// Counters for one scheduler cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Tasks that reached dispatch: window hits with a resolved address.
    /// Window hits without one land in `skipped` instead.
    pub candidates: usize,
    /// Dispatches confirmed by the transport.
    pub delivered: usize,
    /// Dispatches that failed or timed out.
    pub failed: usize,
    /// Tasks dropped before dispatch (no resolvable address).
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_result_predicates() {
        assert!(DeliveryResult::Delivered.is_delivered());
        assert!(!DeliveryResult::Failed("smtp 421".into()).is_delivered());
    }

    #[test]
    fn report_defaults_to_zero() {
        let report = CycleReport::default();
        assert_eq!(report.candidates, 0);
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.skipped, 0);
    }
}
