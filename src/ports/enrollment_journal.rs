//! EnrollmentJournal port - append-only log of per-course enrollment results.
//!
//! Batch enrollment is forward-only: a failed course is not rolled back and
//! earlier courses stay enrolled. The journal records every per-course result
//! of a verified payment so failed entries can be found and retried later.
//! A failure stays pending until a retry succeeds and it is resolved.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::checkout::EnrollmentOutcome;
use crate::domain::foundation::{CourseId, DomainError, JournalEntryId, Timestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalStatus {
    Enrolled,
    AlreadyEnrolled,
    Failed,
}

impl JournalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalStatus::Enrolled => "enrolled",
            JournalStatus::AlreadyEnrolled => "already_enrolled",
            JournalStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enrolled" => Some(JournalStatus::Enrolled),
            "already_enrolled" => Some(JournalStatus::AlreadyEnrolled),
            "failed" => Some(JournalStatus::Failed),
            _ => None,
        }
    }
}

/// One course's result for one verified payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub order_id: String,
    pub payment_id: String,
    pub student_id: UserId,
    pub course_id: CourseId,
    pub status: JournalStatus,

    /// Failure code, set only when `status` is `Failed`.
    pub reason: Option<String>,
    pub recorded_at: Timestamp,
}

impl JournalEntry {
    /// Flattens an enrollment outcome into journal entries, in batch order
    /// within each status.
    pub fn from_outcome(
        order_id: &str,
        payment_id: &str,
        student_id: &UserId,
        outcome: &EnrollmentOutcome,
    ) -> Vec<JournalEntry> {
        let now = Timestamp::now();
        let entry = |course_id: &CourseId, status: JournalStatus, reason: Option<String>| JournalEntry {
            id: JournalEntryId::new(),
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            student_id: student_id.clone(),
            course_id: course_id.clone(),
            status,
            reason,
            recorded_at: now,
        };

        let mut entries = Vec::with_capacity(outcome.total());
        for id in &outcome.enrolled {
            entries.push(entry(id, JournalStatus::Enrolled, None));
        }
        for id in &outcome.already_enrolled {
            entries.push(entry(id, JournalStatus::AlreadyEnrolled, None));
        }
        for failure in &outcome.failed {
            entries.push(entry(
                &failure.course_id,
                JournalStatus::Failed,
                Some(failure.reason.code().to_string()),
            ));
        }
        entries
    }
}

#[async_trait]
pub trait EnrollmentJournal: Send + Sync {
    /// Append entries. All or nothing.
    async fn record(&self, entries: &[JournalEntry]) -> Result<(), DomainError>;

    /// Unresolved failed entries, oldest first.
    async fn pending_failures(&self, limit: u32) -> Result<Vec<JournalEntry>, DomainError>;

    /// Every entry recorded for a provider order, resolved or not.
    async fn entries_for_order(&self, order_id: &str) -> Result<Vec<JournalEntry>, DomainError>;

    /// Marks failed entries as resolved so they leave `pending_failures`.
    /// Ids that are unknown or not failures are ignored.
    async fn resolve(&self, ids: &[JournalEntryId]) -> Result<(), DomainError>;
}
