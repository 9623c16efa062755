//! HTTP adapter for course progress endpoints.
//!
//! - `POST /api/v1/course/updateCourseProgress` - Mark a lecture complete
//! - `POST /api/v1/course/getCourseProgress` - Completed lectures for a course

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{ProgressApiError, ProgressAppState};
pub use routes::progress_router;
