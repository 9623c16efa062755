//! In-memory course progress.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::catalog::MembershipChange;
use crate::domain::foundation::{CourseId, DomainError, SubSectionId, UserId};
use crate::domain::progress::CourseProgress;
use crate::ports::CourseProgressRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    progress: Arc<RwLock<HashMap<(UserId, CourseId), CourseProgress>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseProgressRepository for InMemoryProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<CourseProgress>, DomainError> {
        Ok(self
            .progress
            .read()
            .await
            .get(&(user_id.clone(), course_id.clone()))
            .cloned())
    }

    async fn add_completed_video(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        sub_section_id: &SubSectionId,
    ) -> Result<MembershipChange, DomainError> {
        let mut progress = self.progress.write().await;
        let entry = progress
            .entry((user_id.clone(), course_id.clone()))
            .or_insert_with(|| CourseProgress::empty(user_id.clone(), course_id.clone()));
        Ok(entry.complete(sub_section_id.clone()))
    }
}
