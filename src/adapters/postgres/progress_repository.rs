//! PostgreSQL implementation of CourseProgressRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::MembershipChange;
use crate::domain::foundation::{CourseId, DomainError, SubSectionId, UserId};
use crate::domain::progress::CourseProgress;
use crate::ports::CourseProgressRepository;

use super::{corrupt_row, db_error};

/// One row per completed lecture.
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseProgressRepository for PostgresProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<CourseProgress>, DomainError> {
        let completed: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT sub_section_id FROM course_progress
            WHERE user_id = $1 AND course_id = $2
            ORDER BY position
            "#,
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load course progress", e))?;

        if completed.is_empty() {
            return Ok(None);
        }

        let completed_videos = completed
            .into_iter()
            .map(|id| SubSectionId::new(id).map_err(|e| corrupt_row("sub-section id", e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CourseProgress {
            user_id: user_id.clone(),
            course_id: course_id.clone(),
            completed_videos,
        }))
    }

    async fn add_completed_video(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        sub_section_id: &SubSectionId,
    ) -> Result<MembershipChange, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO course_progress (user_id, course_id, sub_section_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, course_id, sub_section_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(course_id.as_str())
        .bind(sub_section_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("record completed video", e))?;

        Ok(MembershipChange::from_inserted(result.rows_affected() > 0))
    }
}
