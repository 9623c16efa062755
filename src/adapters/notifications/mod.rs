//! Notification dispatcher adapters.

mod background;
mod recording;

pub use background::{BackgroundNotificationDispatcher, DEFAULT_QUEUE_CAPACITY};
pub use recording::RecordingDispatcher;
