//! PostgreSQL implementation of CourseCatalog.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Course, MembershipChange, SubSection};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, SubSectionId, UserId};
use crate::ports::CourseCatalog;

use super::{corrupt_row, db_error, is_foreign_key_violation};

pub struct PostgresCourseCatalog {
    pool: PgPool,
}

impl PostgresCourseCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: String,
    name: String,
    price: i64,
    students: Vec<String>,
}

impl TryFrom<CourseRow> for Course {
    type Error = DomainError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let id = CourseId::new(row.id).map_err(|e| corrupt_row("course id", e))?;
        let price = u64::try_from(row.price).map_err(|e| corrupt_row("course price", e))?;
        let students_enrolled = row
            .students
            .into_iter()
            .map(UserId::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| corrupt_row("roster entry", e))?;

        Ok(Course {
            id,
            name: row.name,
            price,
            students_enrolled,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubSectionRow {
    id: String,
    title: String,
}

#[async_trait]
impl CourseCatalog for PostgresCourseCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.price,
                   COALESCE(
                       ARRAY_AGG(cs.student_id ORDER BY cs.enrolled_at)
                           FILTER (WHERE cs.student_id IS NOT NULL),
                       '{}'
                   ) AS students
            FROM courses c
            LEFT JOIN course_students cs ON cs.course_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find course", e))?;

        row.map(Course::try_from).transpose()
    }

    async fn add_student(
        &self,
        course_id: &CourseId,
        student_id: &UserId,
    ) -> Result<MembershipChange, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO course_students (course_id, student_id)
            SELECT id, $2 FROM courses WHERE id = $1
            ON CONFLICT (course_id, student_id) DO NOTHING
            "#,
        )
        .bind(course_id.as_str())
        .bind(student_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                DomainError::new(ErrorCode::UserNotFound, format!("Student {} not found", student_id))
            } else {
                db_error("add student to course", e)
            }
        })?;

        if result.rows_affected() > 0 {
            return Ok(MembershipChange::Added);
        }

        // Nothing inserted: either already on the roster or no such course.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1)")
            .bind(course_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check course", e))?;

        if exists {
            Ok(MembershipChange::AlreadyPresent)
        } else {
            Err(DomainError::new(
                ErrorCode::CourseNotFound,
                format!("Course {} not found", course_id),
            ))
        }
    }

    async fn find_sub_section(&self, id: &SubSectionId) -> Result<Option<SubSection>, DomainError> {
        let row: Option<SubSectionRow> =
            sqlx::query_as("SELECT id, title FROM sub_sections WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find sub-section", e))?;

        row.map(|r| {
            Ok(SubSection {
                id: SubSectionId::new(r.id).map_err(|e| corrupt_row("sub-section id", e))?,
                title: r.title,
            })
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_converts_to_course() {
        let course = Course::try_from(CourseRow {
            id: "c1".into(),
            name: "Rust 101".into(),
            price: 10,
            students: vec!["u1".into(), "u2".into()],
        })
        .unwrap();

        assert_eq!(course.price, 10);
        assert!(course.has_student(&UserId::new("u2").unwrap()));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = Course::try_from(CourseRow {
            id: "c1".into(),
            name: "Broken".into(),
            price: -1,
            students: vec![],
        })
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
