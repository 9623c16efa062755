//! Course catalog port.
//!
//! Read access to courses and lectures, plus the one write the checkout flow
//! needs: adding a student to a course roster.

use async_trait::async_trait;

use crate::domain::catalog::{Course, MembershipChange, SubSection};
use crate::domain::foundation::{CourseId, DomainError, SubSectionId, UserId};

#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Find a course by id. Returns `None` if it does not exist.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// Add a student to a course roster if not already present.
    ///
    /// Must be a single conditional write so concurrent calls cannot create
    /// duplicates.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if the course does not exist
    /// - `DatabaseError` on persistence failure
    async fn add_student(
        &self,
        course_id: &CourseId,
        student_id: &UserId,
    ) -> Result<MembershipChange, DomainError>;

    /// Find a lecture by id.
    async fn find_sub_section(&self, id: &SubSectionId) -> Result<Option<SubSection>, DomainError>;
}
