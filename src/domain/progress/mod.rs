//! Progress module - tracks which lectures a student has finished.

mod course_progress;
mod errors;

pub use course_progress::{CourseProgress, ProgressUpdate};
pub use errors::ProgressError;
