//! In-memory course catalog.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::{Course, MembershipChange, SubSection};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, SubSectionId, UserId};
use crate::ports::CourseCatalog;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseCatalog {
    courses: Arc<RwLock<HashMap<CourseId, Course>>>,
    sub_sections: Arc<RwLock<HashMap<SubSectionId, SubSection>>>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_course(&self, course: Course) {
        self.courses.write().await.insert(course.id.clone(), course);
    }

    pub async fn insert_sub_section(&self, sub_section: SubSection) {
        self.sub_sections
            .write()
            .await
            .insert(sub_section.id.clone(), sub_section);
    }

    /// Current roster of a course, empty if the course is unknown.
    pub async fn roster(&self, course_id: &CourseId) -> Vec<UserId> {
        self.courses
            .read()
            .await
            .get(course_id)
            .map(|c| c.students_enrolled.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn add_student(
        &self,
        course_id: &CourseId,
        student_id: &UserId,
    ) -> Result<MembershipChange, DomainError> {
        let mut courses = self.courses.write().await;
        let course = courses.get_mut(course_id).ok_or_else(|| {
            DomainError::new(ErrorCode::CourseNotFound, format!("Course {} not found", course_id))
        })?;
        Ok(MembershipChange::from_inserted(
            course.students_enrolled.insert(student_id.clone()),
        ))
    }

    async fn find_sub_section(&self, id: &SubSectionId) -> Result<Option<SubSection>, DomainError> {
        Ok(self.sub_sections.read().await.get(id).cloned())
    }
}
