//! Course progress persistence port.

use async_trait::async_trait;

use crate::domain::catalog::MembershipChange;
use crate::domain::foundation::{CourseId, DomainError, SubSectionId, UserId};
use crate::domain::progress::CourseProgress;

#[async_trait]
pub trait CourseProgressRepository: Send + Sync {
    /// Progress of one student in one course, `None` if nothing recorded yet.
    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<CourseProgress>, DomainError>;

    /// Mark a lecture complete, creating the progress record if needed.
    ///
    /// Insert-if-absent: completing the same lecture twice is a no-op.
    async fn add_completed_video(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        sub_section_id: &SubSectionId,
    ) -> Result<MembershipChange, DomainError>;
}
