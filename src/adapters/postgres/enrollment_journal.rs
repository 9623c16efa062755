//! PostgreSQL implementation of EnrollmentJournal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CourseId, DomainError, JournalEntryId, Timestamp, UserId};
use crate::ports::{EnrollmentJournal, JournalEntry, JournalStatus};

use super::{corrupt_row, db_error};

pub struct PostgresEnrollmentJournal {
    pool: PgPool,
}

impl PostgresEnrollmentJournal {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JournalRow {
    id: Uuid,
    order_id: String,
    payment_id: String,
    student_id: String,
    course_id: String,
    status: String,
    reason: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<JournalRow> for JournalEntry {
    type Error = DomainError;

    fn try_from(row: JournalRow) -> Result<Self, Self::Error> {
        let status = JournalStatus::parse(&row.status)
            .ok_or_else(|| corrupt_row("journal status", &row.status))?;

        Ok(JournalEntry {
            id: JournalEntryId::from_uuid(row.id),
            order_id: row.order_id,
            payment_id: row.payment_id,
            student_id: UserId::new(row.student_id).map_err(|e| corrupt_row("student id", e))?,
            course_id: CourseId::new(row.course_id).map_err(|e| corrupt_row("course id", e))?,
            status,
            reason: row.reason,
            recorded_at: Timestamp::from_datetime(row.recorded_at),
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, order_id, payment_id, student_id, course_id, status, reason, recorded_at FROM enrollment_journal";

#[async_trait]
impl EnrollmentJournal for PostgresEnrollmentJournal {
    async fn record(&self, entries: &[JournalEntry]) -> Result<(), DomainError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("open journal transaction", e))?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO enrollment_journal (
                    id, order_id, payment_id, student_id, course_id, status, reason, recorded_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(&entry.order_id)
            .bind(&entry.payment_id)
            .bind(entry.student_id.as_str())
            .bind(entry.course_id.as_str())
            .bind(entry.status.as_str())
            .bind(&entry.reason)
            .bind(entry.recorded_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("append journal entry", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit journal entries", e))
    }

    async fn pending_failures(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError> {
        let rows: Vec<JournalRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'failed' AND resolved_at IS NULL ORDER BY recorded_at LIMIT $1",
            SELECT_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list failed enrollments", e))?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }

    async fn entries_for_order(&self, order_id: &str) -> Result<Vec<JournalEntry>, DomainError> {
        let rows: Vec<JournalRow> = sqlx::query_as(&format!(
            "{} WHERE order_id = $1 ORDER BY recorded_at, course_id",
            SELECT_COLUMNS
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list journal entries", e))?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }

    async fn resolve(&self, ids: &[JournalEntryId]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        sqlx::query(
            r#"
            UPDATE enrollment_journal
            SET resolved_at = NOW()
            WHERE id = ANY($1) AND status = 'failed' AND resolved_at IS NULL
            "#,
        )
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("resolve journal entries", e))?;

        Ok(())
    }
}
