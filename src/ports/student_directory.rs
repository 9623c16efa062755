//! Student directory port.

use async_trait::async_trait;

use crate::domain::catalog::{MembershipChange, StudentProfile};
use crate::domain::foundation::{CourseId, DomainError, UserId};

/// Access to user records and their enrolled-course sets.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StudentProfile>, DomainError>;

    /// Add a course to the student's set if not already present.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    /// - `DatabaseError` on persistence failure
    async fn add_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<MembershipChange, DomainError>;

    /// Courses the student is enrolled in, in enrollment order.
    async fn enrolled_courses(&self, student_id: &UserId) -> Result<Vec<CourseId>, DomainError>;
}
