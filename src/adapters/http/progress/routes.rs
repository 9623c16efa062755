//! Axum router configuration for the course progress endpoints.

use axum::{routing::post, Router};

use super::handlers::{get_course_progress, update_course_progress, ProgressAppState};

/// Create the progress router, mounted under `/course`.
///
/// # Routes
/// - `POST /course/updateCourseProgress` - student accounts only
/// - `POST /course/getCourseProgress` - any authenticated user
pub fn progress_router() -> Router<ProgressAppState> {
    Router::new()
        .route("/course/updateCourseProgress", post(update_course_progress))
        .route("/course/getCourseProgress", post(get_course_progress))
}
