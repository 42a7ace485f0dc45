//! Dispatch: one bounded send attempt per candidate.

use std::sync::Arc;
use std::time::Duration;

use crate::app::selector::Candidate;
use crate::domain::DeliveryResult;
use crate::ports::{Mailer, ReminderMail};

/// Wraps the transport with a per-attempt timeout and message rendering.
///
/// The transport client is injected once at construction and shared across
/// all dispatch units; it has no other lifecycle here.
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, timeout: Duration) -> Self {
        Self { mailer, timeout }
    }

    /// One attempt, exactly one `send` call. A timed-out attempt counts as
    /// `Failed`, never `Delivered`: the transport may still deliver late, but
    /// without confirmation the guard must not be set.
    pub async fn dispatch(&self, candidate: &Candidate) -> DeliveryResult {
        let mail = render(candidate);
        match tokio::time::timeout(self.timeout, self.mailer.send(&mail)).await {
            Ok(Ok(())) => DeliveryResult::Delivered,
            Ok(Err(err)) => DeliveryResult::Failed(err.to_string()),
            Err(_) => DeliveryResult::Failed(format!(
                "send did not complete within {}s",
                self.timeout.as_secs()
            )),
        }
    }
}

/// Message content is a deterministic function of title and due time.
/// Wording is presentation, not contract.
fn render(candidate: &Candidate) -> ReminderMail {
    let title = &candidate.task.title;
    let due = candidate.due_at.format("%Y-%m-%d %H:%M UTC");
    ReminderMail {
        to: candidate.address.clone(),
        subject: format!("Reminder: \"{title}\" is due soon"),
        body: format!("Your task \"{title}\" is due at {due}. Time to wrap it up."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskRecord;
    use crate::impls::RecordingMailer;
    use crate::ports::Address;
    use chrono::{DateTime, TimeZone, Utc};
    use ulid::Ulid;

    fn candidate(title: &str, due_at: DateTime<Utc>) -> Candidate {
        let task = TaskRecord::new(
            Ulid::new().into(),
            Ulid::new().into(),
            title,
            Some(due_at),
            due_at - chrono::Duration::hours(1),
        );
        Candidate {
            task,
            due_at,
            address: Address::new("ada@example.com"),
        }
    }

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 10, 0).unwrap()
    }

    #[tokio::test]
    async fn delivered_when_transport_accepts() {
        let mailer = Arc::new(RecordingMailer::new());
        let dispatcher = Dispatcher::new(mailer.clone(), Duration::from_secs(5));

        let result = dispatcher.dispatch(&candidate("file taxes", due())).await;
        assert_eq!(result, DeliveryResult::Delivered);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "ada@example.com");
        assert!(sent[0].subject.contains("file taxes"));
        assert!(sent[0].body.contains("2024-06-01 12:10 UTC"));
    }

    #[tokio::test]
    async fn failure_carries_the_transport_reason() {
        let mailer = Arc::new(RecordingMailer::new());
        mailer.fail_times(1);
        let dispatcher = Dispatcher::new(mailer, Duration::from_secs(5));

        let result = dispatcher.dispatch(&candidate("file taxes", due())).await;
        match result {
            DeliveryResult::Failed(reason) => assert!(reason.contains("injected failure")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_transport_times_out_as_failed() {
        let mailer = Arc::new(RecordingMailer::new());
        mailer.set_latency(Some(Duration::from_secs(60)));
        let dispatcher = Dispatcher::new(mailer, Duration::from_secs(10));

        let result = dispatcher.dispatch(&candidate("file taxes", due())).await;
        match result {
            DeliveryResult::Failed(reason) => assert!(reason.contains("did not complete")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(&candidate("file taxes", due()));
        let b = render(&candidate("file taxes", due()));
        assert_eq!(a, b);
    }
}
