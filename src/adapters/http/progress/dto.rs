//! HTTP DTOs for the course progress endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::progress::CourseProgress;

/// Body of `POST /course/updateCourseProgress`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseProgressRequest {
    #[serde(default)]
    pub course_id: Option<String>,
    // The client sends `subsectionId`, lower-case s.
    #[serde(default, rename = "subsectionId")]
    pub sub_section_id: Option<String>,
}

/// Body of `POST /course/getCourseProgress`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCourseProgressRequest {
    #[serde(default)]
    pub course_id: Option<String>,
}

/// Progress response wrapper used by both endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CourseProgressResponse {
    pub success: bool,
    pub message: String,
    pub data: CourseProgress,
}

impl CourseProgressResponse {
    pub fn new(message: impl Into<String>, data: CourseProgress) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}
