//! Mailer that keeps sent messages in memory.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{MailError, Mailer, OutgoingEmail};

/// Records every email instead of delivering it. Can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    failure: Arc<Mutex<Option<MailError>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with `error`.
    pub fn failing(error: MailError) -> Self {
        let mailer = Self::new();
        *mailer.failure.lock().unwrap() = Some(error);
        mailer
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
