//! GetCourseProgressHandler - completed lectures of a student in a course.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, UserId};
use crate::domain::progress::{CourseProgress, ProgressError};
use crate::ports::CourseProgressRepository;

#[derive(Debug, Clone)]
pub struct GetCourseProgressQuery {
    pub user_id: UserId,
    pub course_id: Option<String>,
}

pub struct GetCourseProgressHandler {
    progress: Arc<dyn CourseProgressRepository>,
}

impl GetCourseProgressHandler {
    pub fn new(progress: Arc<dyn CourseProgressRepository>) -> Self {
        Self { progress }
    }

    /// Returns an empty record when nothing has been completed yet.
    pub async fn handle(&self, query: GetCourseProgressQuery) -> Result<CourseProgress, ProgressError> {
        let course_id = CourseId::new(query.course_id.unwrap_or_default())?;
        let progress = self
            .progress
            .find(&query.user_id, &course_id)
            .await?
            .unwrap_or_else(|| CourseProgress::empty(query.user_id, course_id));
        Ok(progress)
    }
}
