//! Mailer port - the outbound notification transport.
//!
//! The transport (an SMTP relay, usually) is an independent, possibly slow,
//! possibly rate-limited external service. It may retry internally; this core
//! hands each message over exactly once per attempt and judges only the
//! accept/reject answer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("transport rejected message: {0}")]
    Rejected(String),

    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Outbound address. Opaque to this core; the transport decides what it
/// means (an email address, in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One reminder message, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMail {
    pub to: Address,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand one message to the transport.
    async fn send(&self, mail: &ReminderMail) -> Result<(), MailError>;
}
