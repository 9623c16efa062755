//! HTTP handlers for the course progress endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::checkout::ErrorResponse;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::{RequireAuth, RequireStudent};
use crate::application::{
    GetCourseProgressHandler, GetCourseProgressQuery, UpdateCourseProgressCommand,
    UpdateCourseProgressHandler,
};
use crate::domain::progress::ProgressError;

use super::dto::{CourseProgressResponse, GetCourseProgressRequest, UpdateCourseProgressRequest};

/// Shared state for the progress routes.
#[derive(Clone)]
pub struct ProgressAppState {
    pub update_progress: Arc<UpdateCourseProgressHandler>,
    pub get_progress: Arc<GetCourseProgressHandler>,
}

/// POST /api/v1/course/updateCourseProgress - Mark a lecture complete
pub async fn update_course_progress(
    State(state): State<ProgressAppState>,
    RequireStudent(user): RequireStudent,
    ApiJson(request): ApiJson<UpdateCourseProgressRequest>,
) -> Result<impl IntoResponse, ProgressApiError> {
    let cmd = UpdateCourseProgressCommand {
        user_id: user.id,
        course_id: request.course_id,
        sub_section_id: request.sub_section_id,
    };

    let result = state.update_progress.handle(cmd).await?;
    Ok(Json(CourseProgressResponse::new(
        result.update.message(),
        result.progress,
    )))
}

/// POST /api/v1/course/getCourseProgress - Completed lectures for a course
pub async fn get_course_progress(
    State(state): State<ProgressAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<GetCourseProgressRequest>,
) -> Result<impl IntoResponse, ProgressApiError> {
    let query = GetCourseProgressQuery {
        user_id: user.id,
        course_id: request.course_id,
    };

    let progress = state.get_progress.handle(query).await?;
    let message = if progress.completed_videos.is_empty() {
        "No progress found"
    } else {
        "Course progress fetched successfully"
    };
    Ok(Json(CourseProgressResponse::new(message, progress)))
}

/// API error wrapper for progress errors.
#[derive(Debug)]
pub struct ProgressApiError(ProgressError);

impl From<ProgressError> for ProgressApiError {
    fn from(err: ProgressError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ProgressApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ProgressError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ProgressError::SubSectionNotFound(_) | ProgressError::CourseNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ProgressError::Infrastructure(cause) => {
                tracing::error!(error = %cause, "Progress request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code(), self.0.message());
        (status, Json(body)).into_response()
    }
}
