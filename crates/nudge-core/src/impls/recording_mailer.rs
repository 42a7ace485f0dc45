//! Recording mailer (development and tests).
//!
//! Scriptable stand-in for the real transport: can fail the next N attempts
//! or add artificial latency, and records everything it accepted.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{MailError, Mailer, ReminderMail};

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<ReminderMail>>,
    attempts: AtomicU32,
    remaining_failures: AtomicU32,
    latency: Mutex<Option<Duration>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` send attempts.
    pub fn fail_times(&self, n: u32) {
        self.remaining_failures.store(n, Ordering::Relaxed);
    }

    /// Sleep this long inside every send (timeout exercises).
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Messages the transport accepted, in acceptance order.
    pub fn sent(&self) -> Vec<ReminderMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Total attempts, including failed and abandoned ones.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &ReminderMail) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(MailError::Unavailable(format!(
                "injected failure (left={left})"
            )));
        }

        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
