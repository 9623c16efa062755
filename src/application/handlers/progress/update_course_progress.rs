//! UpdateCourseProgressHandler - marks a lecture complete for a student.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, SubSectionId, UserId};
use crate::domain::progress::{CourseProgress, ProgressError, ProgressUpdate};
use crate::ports::{CourseCatalog, CourseProgressRepository};

#[derive(Debug, Clone)]
pub struct UpdateCourseProgressCommand {
    pub user_id: UserId,
    pub course_id: Option<String>,
    pub sub_section_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateCourseProgressResult {
    pub update: ProgressUpdate,
    pub progress: CourseProgress,
}

pub struct UpdateCourseProgressHandler {
    catalog: Arc<dyn CourseCatalog>,
    progress: Arc<dyn CourseProgressRepository>,
}

impl UpdateCourseProgressHandler {
    pub fn new(catalog: Arc<dyn CourseCatalog>, progress: Arc<dyn CourseProgressRepository>) -> Self {
        Self { catalog, progress }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCourseProgressCommand,
    ) -> Result<UpdateCourseProgressResult, ProgressError> {
        let sub_section_id = SubSectionId::new(cmd.sub_section_id.unwrap_or_default())?;
        let course_id = CourseId::new(cmd.course_id.unwrap_or_default())?;

        // Lecture is checked before the course, matching the API's error precedence.
        if self.catalog.find_sub_section(&sub_section_id).await?.is_none() {
            return Err(ProgressError::SubSectionNotFound(sub_section_id));
        }
        if self.catalog.find_by_id(&course_id).await?.is_none() {
            return Err(ProgressError::CourseNotFound(course_id));
        }

        let existing = self.progress.find(&cmd.user_id, &course_id).await?;
        let change = self
            .progress
            .add_completed_video(&cmd.user_id, &course_id, &sub_section_id)
            .await?;

        let update = match (&existing, change.was_added()) {
            (None, _) => ProgressUpdate::Created,
            (Some(_), true) => ProgressUpdate::Updated,
            (Some(_), false) => ProgressUpdate::AlreadyCompleted,
        };

        let mut progress =
            existing.unwrap_or_else(|| CourseProgress::empty(cmd.user_id.clone(), course_id.clone()));
        progress.complete(sub_section_id.clone());

        tracing::debug!(
            user_id = %cmd.user_id,
            %course_id,
            %sub_section_id,
            update = ?update,
            "Course progress updated"
        );

        Ok(UpdateCourseProgressResult { update, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCourseCatalog, InMemoryProgressRepository};
    use crate::domain::catalog::{Course, SubSection};

    async fn handler() -> UpdateCourseProgressHandler {
        let catalog = InMemoryCourseCatalog::new();
        catalog
            .insert_course(Course::new(CourseId::new("c1").unwrap(), "Rust 101", 10))
            .await;
        for id in ["s1", "s2"] {
            catalog
                .insert_sub_section(SubSection {
                    id: SubSectionId::new(id).unwrap(),
                    title: format!("Lecture {id}"),
                })
                .await;
        }
        UpdateCourseProgressHandler::new(Arc::new(catalog), Arc::new(InMemoryProgressRepository::new()))
    }

    fn cmd(course: &str, sub_section: &str) -> UpdateCourseProgressCommand {
        UpdateCourseProgressCommand {
            user_id: UserId::new("u1").unwrap(),
            course_id: Some(course.into()),
            sub_section_id: Some(sub_section.into()),
        }
    }

    #[tokio::test]
    async fn first_lecture_creates_progress() {
        let handler = handler().await;

        let result = handler.handle(cmd("c1", "s1")).await.unwrap();

        assert_eq!(result.update, ProgressUpdate::Created);
        assert_eq!(result.progress.completed_videos.len(), 1);
    }

    #[tokio::test]
    async fn later_lectures_update_and_repeats_are_noops() {
        let handler = handler().await;
        handler.handle(cmd("c1", "s1")).await.unwrap();

        let second = handler.handle(cmd("c1", "s2")).await.unwrap();
        let repeat = handler.handle(cmd("c1", "s2")).await.unwrap();

        assert_eq!(second.update, ProgressUpdate::Updated);
        assert_eq!(repeat.update, ProgressUpdate::AlreadyCompleted);
        assert_eq!(repeat.progress.completed_videos.len(), 2);
    }

    #[tokio::test]
    async fn unknown_lecture_is_reported_first() {
        let handler = handler().await;

        let err = handler.handle(cmd("missing", "missing")).await.unwrap_err();

        assert!(matches!(err, ProgressError::SubSectionNotFound(_)));
    }

    #[tokio::test]
    async fn unknown_course_is_reported() {
        let handler = handler().await;

        let err = handler.handle(cmd("missing", "s1")).await.unwrap_err();

        assert!(matches!(err, ProgressError::CourseNotFound(_)));
    }

    #[tokio::test]
    async fn blank_ids_are_validation_errors() {
        let handler = handler().await;

        let err = handler.handle(cmd("c1", " ")).await.unwrap_err();

        assert!(matches!(err, ProgressError::ValidationFailed { .. }));
    }
}
