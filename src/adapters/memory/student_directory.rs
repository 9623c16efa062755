//! In-memory student directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::{MembershipChange, StudentProfile};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};
use crate::ports::StudentDirectory;

#[derive(Debug, Clone)]
struct StudentRecord {
    profile: StudentProfile,
    courses: Vec<CourseId>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStudentDirectory {
    students: Arc<RwLock<HashMap<UserId, StudentRecord>>>,
}

impl InMemoryStudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_student(&self, profile: StudentProfile) {
        self.students.write().await.insert(
            profile.id.clone(),
            StudentRecord {
                profile,
                courses: Vec::new(),
            },
        );
    }
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id))
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StudentProfile>, DomainError> {
        Ok(self.students.read().await.get(id).map(|r| r.profile.clone()))
    }

    async fn add_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<MembershipChange, DomainError> {
        let mut students = self.students.write().await;
        let record = students
            .get_mut(student_id)
            .ok_or_else(|| user_not_found(student_id))?;
        if record.courses.contains(course_id) {
            return Ok(MembershipChange::AlreadyPresent);
        }
        record.courses.push(course_id.clone());
        Ok(MembershipChange::Added)
    }

    async fn enrolled_courses(&self, student_id: &UserId) -> Result<Vec<CourseId>, DomainError> {
        self.students
            .read()
            .await
            .get(student_id)
            .map(|r| r.courses.clone())
            .ok_or_else(|| user_not_found(student_id))
    }
}
