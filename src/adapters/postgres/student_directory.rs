//! PostgreSQL implementation of StudentDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{MembershipChange, StudentProfile};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};
use crate::ports::StudentDirectory;

use super::{corrupt_row, db_error};

pub struct PostgresStudentDirectory {
    pool: PgPool,
}

impl PostgresStudentDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl TryFrom<StudentRow> for StudentProfile {
    type Error = DomainError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|e| corrupt_row("user id", e))?;
        Ok(StudentProfile::new(id, row.first_name, row.last_name, row.email))
    }
}

#[async_trait]
impl StudentDirectory for PostgresStudentDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<StudentProfile>, DomainError> {
        let row: Option<StudentRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, email FROM users WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find user", e))?;

        row.map(StudentProfile::try_from).transpose()
    }

    async fn add_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<MembershipChange, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_courses (user_id, course_id)
            SELECT id, $2 FROM users WHERE id = $1
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(student_id.as_str())
        .bind(course_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("add course to user", e))?;

        if result.rows_affected() > 0 {
            return Ok(MembershipChange::Added);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(student_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check user", e))?;

        if exists {
            Ok(MembershipChange::AlreadyPresent)
        } else {
            Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User {} not found", student_id),
            ))
        }
    }

    async fn enrolled_courses(&self, student_id: &UserId) -> Result<Vec<CourseId>, DomainError> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT course_id FROM user_courses WHERE user_id = $1 ORDER BY position",
        )
        .bind(student_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list enrolled courses", e))?;

        ids.into_iter()
            .map(|id| CourseId::new(id).map_err(|e| corrupt_row("course id", e)))
            .collect()
    }
}
