//! Dispatcher that captures notifications synchronously.

use std::sync::{Arc, Mutex};

use crate::ports::{NotificationDispatcher, OutgoingEmail};

/// Keeps dispatched emails in memory for assertions.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    dispatched: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatched(&self) -> Vec<OutgoingEmail> {
        self.dispatched.lock().unwrap().clone()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, email: OutgoingEmail) {
        self.dispatched.lock().unwrap().push(email);
    }
}
