//! ReconcileEnrollmentsHandler - retries journaled enrollment failures.
//!
//! Failed journal entries are grouped by order and student and fed back
//! through the enrollment engine. Courses that now enroll get a fresh journal
//! entry and their failed entries are resolved. Courses that still fail stay
//! pending for the next run.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::checkout::{CheckoutError, CourseBatch, EnrollmentOutcome};
use crate::domain::foundation::{CourseId, JournalEntryId, UserId};
use crate::ports::{EnrollmentJournal, JournalEntry, JournalStatus};

use super::EnrollmentEngine;

/// Counts from one reconciliation run, in journal entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub retried: usize,
    pub resolved: usize,
    pub still_failing: usize,
}

pub struct ReconcileEnrollmentsHandler {
    engine: Arc<EnrollmentEngine>,
    journal: Arc<dyn EnrollmentJournal>,
}

impl ReconcileEnrollmentsHandler {
    pub fn new(engine: Arc<EnrollmentEngine>, journal: Arc<dyn EnrollmentJournal>) -> Self {
        Self { engine, journal }
    }

    /// Retries up to `limit` pending failures, oldest first.
    pub async fn handle(&self, limit: u32) -> Result<ReconcileReport, CheckoutError> {
        let pending = self.journal.pending_failures(limit).await?;
        let mut report = ReconcileReport::default();

        for group in group_by_payment(pending) {
            self.reconcile_payment(group, &mut report).await?;
        }

        if report.retried > 0 {
            tracing::info!(
                retried = report.retried,
                resolved = report.resolved,
                still_failing = report.still_failing,
                "Enrollment reconciliation finished"
            );
        }
        Ok(report)
    }

    /// Runs `handle` every `period` until the task is dropped.
    pub async fn run_every(&self, period: Duration, limit: u32) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = self.handle(limit).await {
                tracing::error!(error = %e, "Enrollment reconciliation failed");
            }
        }
    }

    /// `failed` is non-empty and shares one order and student.
    async fn reconcile_payment(
        &self,
        failed: Vec<JournalEntry>,
        report: &mut ReconcileReport,
    ) -> Result<(), CheckoutError> {
        let Some(first) = failed.first() else {
            return Ok(());
        };
        let order_id = first.order_id.clone();
        let payment_id = first.payment_id.clone();
        let student_id = first.student_id.clone();

        // A course can already be settled when an earlier run enrolled it but
        // could not resolve the failure.
        let settled: HashSet<CourseId> = self
            .journal
            .entries_for_order(&order_id)
            .await?
            .into_iter()
            .filter(|e| e.student_id == student_id && e.status != JournalStatus::Failed)
            .map(|e| e.course_id)
            .collect();

        let (done, retry): (Vec<JournalEntry>, Vec<JournalEntry>) = failed
            .into_iter()
            .partition(|e| settled.contains(&e.course_id));
        let mut resolved: Vec<JournalEntryId> = done.iter().map(|e| e.id).collect();

        if !retry.is_empty() {
            let batch = CourseBatch::new(retry.iter().map(|e| e.course_id.clone()).collect())?;
            let outcome = self.engine.enroll(&batch, &student_id).await;
            report.retried += retry.len();

            let successes: Vec<JournalEntry> =
                JournalEntry::from_outcome(&order_id, &payment_id, &student_id, &outcome)
                    .into_iter()
                    .filter(|e| e.status != JournalStatus::Failed)
                    .collect();
            self.journal.record(&successes).await?;

            for entry in &retry {
                if succeeded(&outcome, &entry.course_id) {
                    resolved.push(entry.id);
                } else {
                    report.still_failing += 1;
                }
            }
            log_failures(&order_id, &student_id, &outcome);
        }

        self.journal.resolve(&resolved).await?;
        report.resolved += resolved.len();
        Ok(())
    }
}

fn succeeded(outcome: &EnrollmentOutcome, course_id: &CourseId) -> bool {
    outcome.enrolled.contains(course_id) || outcome.already_enrolled.contains(course_id)
}

fn log_failures(order_id: &str, student_id: &UserId, outcome: &EnrollmentOutcome) {
    for failure in &outcome.failed {
        if failure.reason.is_retryable() {
            tracing::debug!(
                order_id,
                %student_id,
                course_id = %failure.course_id,
                reason = failure.reason.code(),
                "Enrollment still failing, will retry"
            );
        } else {
            tracing::warn!(
                order_id,
                %student_id,
                course_id = %failure.course_id,
                reason = failure.reason.code(),
                "Enrollment failure needs attention"
            );
        }
    }
}

/// Groups entries by (order, student), keeping first-seen order.
fn group_by_payment(entries: Vec<JournalEntry>) -> Vec<Vec<JournalEntry>> {
    let mut groups: Vec<Vec<JournalEntry>> = Vec::new();
    for entry in entries {
        let existing = groups.iter_mut().find(|g| {
            g.first()
                .map_or(false, |e| e.order_id == entry.order_id && e.student_id == entry.student_id)
        });
        match existing {
            Some(group) => group.push(entry),
            None => groups.push(vec![entry]),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCourseCatalog, InMemoryEnrollmentJournal, InMemoryStudentDirectory,
    };
    use crate::adapters::notifications::RecordingDispatcher;
    use crate::domain::catalog::{Course, StudentProfile};
    use crate::domain::checkout::EnrollmentFailureReason;

    struct Fixture {
        catalog: Arc<InMemoryCourseCatalog>,
        journal: Arc<InMemoryEnrollmentJournal>,
        notifier: RecordingDispatcher,
        handler: ReconcileEnrollmentsHandler,
    }

    impl Fixture {
        async fn new() -> Self {
            let catalog = Arc::new(InMemoryCourseCatalog::new());
            let directory = Arc::new(InMemoryStudentDirectory::new());
            directory
                .insert_student(StudentProfile::new(student(), "Asha", "Rao", "asha@example.com"))
                .await;
            let journal = Arc::new(InMemoryEnrollmentJournal::new());
            let notifier = RecordingDispatcher::new();
            let engine = Arc::new(EnrollmentEngine::new(
                catalog.clone(),
                directory,
                Arc::new(notifier.clone()),
                Duration::from_secs(5),
            ));
            Self {
                handler: ReconcileEnrollmentsHandler::new(engine, journal.clone()),
                catalog,
                journal,
                notifier,
            }
        }

        async fn add_course(&self, id: &str) {
            self.catalog
                .insert_course(Course::new(course(id), format!("Course {id}"), 10))
                .await;
        }

        async fn record_failures(&self, order_id: &str, courses: &[&str]) -> Vec<JournalEntry> {
            let mut outcome = EnrollmentOutcome::new();
            for id in courses {
                outcome.record_failure(course(id), EnrollmentFailureReason::TimedOut);
            }
            let entries = JournalEntry::from_outcome(order_id, "pay_1", &student(), &outcome);
            self.journal.record(&entries).await.unwrap();
            entries
        }
    }

    fn student() -> UserId {
        UserId::new("u1").unwrap()
    }

    fn course(id: &str) -> CourseId {
        CourseId::new(id).unwrap()
    }

    #[tokio::test]
    async fn nothing_pending_is_a_no_op() {
        let f = Fixture::new().await;

        let report = f.handler.handle(10).await.unwrap();

        assert_eq!(report, ReconcileReport::default());
    }

    #[tokio::test]
    async fn recovered_course_is_enrolled_and_resolved() {
        let f = Fixture::new().await;
        f.record_failures("order_1", &["a"]).await;
        f.add_course("a").await;

        let report = f.handler.handle(10).await.unwrap();

        assert_eq!(
            report,
            ReconcileReport { retried: 1, resolved: 1, still_failing: 0 }
        );
        assert_eq!(f.catalog.roster(&course("a")).await, vec![student()]);
        assert_eq!(f.notifier.dispatched().len(), 1);
        assert!(f.journal.pending_failures(10).await.unwrap().is_empty());

        let entries = f.journal.entries_for_order("order_1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].status, JournalStatus::Enrolled);
        assert_eq!(entries[1].payment_id, "pay_1");
    }

    #[tokio::test]
    async fn still_failing_course_stays_pending() {
        let f = Fixture::new().await;
        f.record_failures("order_1", &["a", "missing"]).await;
        f.add_course("a").await;

        let report = f.handler.handle(10).await.unwrap();

        assert_eq!(
            report,
            ReconcileReport { retried: 2, resolved: 1, still_failing: 1 }
        );
        let pending = f.journal.pending_failures(10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].course_id, course("missing"));

        // The new failure is not journaled twice.
        assert_eq!(f.journal.len().await, 3);
    }

    #[tokio::test]
    async fn settled_course_is_resolved_without_reenrolling() {
        let f = Fixture::new().await;
        let failed = f.record_failures("order_1", &["a"]).await;
        let mut enrolled = failed[0].clone();
        enrolled.id = JournalEntryId::new();
        enrolled.status = JournalStatus::Enrolled;
        enrolled.reason = None;
        f.journal.record(&[enrolled]).await.unwrap();

        let report = f.handler.handle(10).await.unwrap();

        assert_eq!(
            report,
            ReconcileReport { retried: 0, resolved: 1, still_failing: 0 }
        );
        assert!(f.catalog.roster(&course("a")).await.is_empty());
        assert!(f.notifier.dispatched().is_empty());
        assert!(f.journal.pending_failures(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_are_retried_separately() {
        let f = Fixture::new().await;
        f.record_failures("order_1", &["a"]).await;
        f.record_failures("order_2", &["b"]).await;
        f.add_course("a").await;
        f.add_course("b").await;

        let report = f.handler.handle(10).await.unwrap();

        assert_eq!(report.resolved, 2);
        let second = f.journal.entries_for_order("order_2").await.unwrap();
        assert!(second
            .iter()
            .any(|e| e.status == JournalStatus::Enrolled && e.course_id == course("b")));
    }

    #[tokio::test]
    async fn limit_caps_the_run() {
        let f = Fixture::new().await;
        f.record_failures("order_1", &["a", "b", "c"]).await;
        for id in ["a", "b", "c"] {
            f.add_course(id).await;
        }

        let report = f.handler.handle(2).await.unwrap();

        assert_eq!(report.retried, 2);
        assert_eq!(f.journal.pending_failures(10).await.unwrap().len(), 1);
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let mut outcome = EnrollmentOutcome::new();
        outcome.record_failure(course("a"), EnrollmentFailureReason::TimedOut);
        let one = JournalEntry::from_outcome("order_1", "pay_1", &student(), &outcome);
        let two = JournalEntry::from_outcome("order_2", "pay_2", &student(), &outcome);
        let entries = vec![one[0].clone(), two[0].clone(), one[0].clone()];

        let groups = group_by_payment(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].order_id, "order_1");
        assert_eq!(groups[1][0].order_id, "order_2");
    }
}
