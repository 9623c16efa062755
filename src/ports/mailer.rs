//! Outbound email ports.
//!
//! `Mailer` performs a delivery and reports the result. `NotificationDispatcher`
//! is the fire-and-forget front door used on request paths: it accepts an
//! email and returns immediately, whatever happens to the delivery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html_body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    #[error("Recipient address is invalid: {0}")]
    InvalidRecipient(String),

    #[error("Mail provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Mail provider unreachable: {0}")]
    Network(String),
}

/// Synchronous delivery through a mail provider.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Best-effort, non-blocking delivery.
///
/// Implementations must never block the caller nor surface delivery errors.
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, email: OutgoingEmail);
}
