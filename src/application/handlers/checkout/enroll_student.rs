//! EnrollmentEngine - adds one student to a batch of courses.
//!
//! Each course is processed on its own: roster first, then the student's
//! course set, then a best-effort confirmation mail. A failure is recorded
//! against that course and the batch moves on; earlier courses are never
//! rolled back. A student unknown to the directory fails every course
//! without any write.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::catalog::StudentProfile;
use crate::domain::checkout::{templates, CourseBatch, EnrollmentFailureReason, EnrollmentOutcome};
use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId};
use crate::ports::{CourseCatalog, NotificationDispatcher, OutgoingEmail, StudentDirectory};

enum CourseStep {
    Enrolled { course_name: String },
    AlreadyEnrolled,
}

pub struct EnrollmentEngine {
    catalog: Arc<dyn CourseCatalog>,
    directory: Arc<dyn StudentDirectory>,
    notifier: Arc<dyn NotificationDispatcher>,
    step_timeout: Duration,
}

impl EnrollmentEngine {
    pub fn new(
        catalog: Arc<dyn CourseCatalog>,
        directory: Arc<dyn StudentDirectory>,
        notifier: Arc<dyn NotificationDispatcher>,
        step_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            directory,
            notifier,
            step_timeout,
        }
    }

    /// Enrolls `student_id` in every course of the batch.
    ///
    /// Never fails as a whole; per-course problems are in `outcome.failed`.
    pub async fn enroll(&self, courses: &CourseBatch, student_id: &UserId) -> EnrollmentOutcome {
        let mut outcome = EnrollmentOutcome::new();
        let profile = match self.directory.find_by_id(student_id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::warn!(%student_id, "Unknown student, nothing enrolled");
                for course_id in courses {
                    outcome.record_failure(course_id.clone(), EnrollmentFailureReason::StudentNotFound);
                }
                return outcome;
            }
            Err(e) => {
                tracing::warn!(%student_id, error = %e, "Student lookup failed, skipping enrollment mail");
                None
            }
        };

        for course_id in courses {
            match tokio::time::timeout(self.step_timeout, self.enroll_one(course_id, student_id)).await {
                Ok(Ok(CourseStep::Enrolled { course_name })) => {
                    tracing::info!(%student_id, %course_id, "Student enrolled");
                    if let Some(profile) = &profile {
                        self.notify(profile, &course_name);
                    }
                    outcome.record_enrolled(course_id.clone());
                }
                Ok(Ok(CourseStep::AlreadyEnrolled)) => {
                    tracing::debug!(%student_id, %course_id, "Student already enrolled");
                    outcome.record_already_enrolled(course_id.clone());
                }
                Ok(Err(reason)) => {
                    tracing::warn!(%student_id, %course_id, reason = reason.code(), "Enrollment failed");
                    outcome.record_failure(course_id.clone(), reason);
                }
                Err(_) => {
                    tracing::warn!(%student_id, %course_id, "Enrollment timed out");
                    outcome.record_failure(course_id.clone(), EnrollmentFailureReason::TimedOut);
                }
            }
        }

        outcome
    }

    async fn enroll_one(
        &self,
        course_id: &CourseId,
        student_id: &UserId,
    ) -> Result<CourseStep, EnrollmentFailureReason> {
        let course = self
            .catalog
            .find_by_id(course_id)
            .await
            .map_err(classify)?
            .ok_or(EnrollmentFailureReason::CourseNotFound)?;

        let roster = self
            .catalog
            .add_student(course_id, student_id)
            .await
            .map_err(classify)?;
        let student_set = self
            .directory
            .add_course(student_id, course_id)
            .await
            .map_err(classify)?;

        if roster.was_added() || student_set.was_added() {
            Ok(CourseStep::Enrolled {
                course_name: course.name,
            })
        } else {
            Ok(CourseStep::AlreadyEnrolled)
        }
    }

    fn notify(&self, profile: &StudentProfile, course_name: &str) {
        self.notifier.dispatch(OutgoingEmail::new(
            profile.email.clone(),
            templates::course_enrollment_subject(course_name),
            templates::course_enrollment_email(course_name, &profile.first_name),
        ));
    }
}

fn classify(err: DomainError) -> EnrollmentFailureReason {
    match err.code {
        ErrorCode::CourseNotFound => EnrollmentFailureReason::CourseNotFound,
        ErrorCode::UserNotFound => EnrollmentFailureReason::StudentNotFound,
        ErrorCode::Timeout => EnrollmentFailureReason::TimedOut,
        _ => EnrollmentFailureReason::StoreUnavailable(err.message),
    }
}
