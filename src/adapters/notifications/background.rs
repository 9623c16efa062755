//! Background notification dispatcher.
//!
//! Request handlers push emails onto a bounded queue and return at once; a
//! single worker task drains the queue and calls the `Mailer`. Delivery
//! errors and a full queue are logged and otherwise ignored.
//!
//! ## Shutdown
//!
//! The worker stops once every dispatcher handle is dropped and the queue is
//! empty, so awaiting the returned `JoinHandle` after the server stops flushes
//! pending mail.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::ports::{Mailer, NotificationDispatcher, OutgoingEmail};

/// Default queue depth when none is configured.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Queue-backed dispatcher. Cheap to clone.
#[derive(Clone)]
pub struct BackgroundNotificationDispatcher {
    sender: mpsc::Sender<OutgoingEmail>,
}

impl BackgroundNotificationDispatcher {
    /// Starts the worker on the current runtime.
    pub fn spawn(mailer: Arc<dyn Mailer>, queue_capacity: usize) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));
        let worker = NotificationWorker { receiver, mailer };
        let handle = tokio::spawn(worker.run());
        (Self { sender }, handle)
    }
}

impl NotificationDispatcher for BackgroundNotificationDispatcher {
    fn dispatch(&self, email: OutgoingEmail) {
        match self.sender.try_send(email) {
            Ok(()) => {}
            Err(TrySendError::Full(email)) => {
                tracing::warn!(to = %email.to, subject = %email.subject, "Notification queue full, dropping email");
            }
            Err(TrySendError::Closed(email)) => {
                tracing::warn!(to = %email.to, subject = %email.subject, "Notification worker stopped, dropping email");
            }
        }
    }
}

struct NotificationWorker {
    receiver: mpsc::Receiver<OutgoingEmail>,
    mailer: Arc<dyn Mailer>,
}

impl NotificationWorker {
    async fn run(mut self) {
        while let Some(email) = self.receiver.recv().await {
            let to = email.to.clone();
            let subject = email.subject.clone();
            match self.mailer.send(email).await {
                Ok(()) => tracing::debug!(%to, %subject, "Notification delivered"),
                Err(e) => tracing::error!(%to, %subject, error = %e, "Notification delivery failed"),
            }
        }
        tracing::info!("Notification worker stopped");
    }
}
