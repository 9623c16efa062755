//! Result of a batch enrollment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CourseId;

/// Why a single course in a batch could not be enrolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentFailureReason {
    CourseNotFound,
    StudentNotFound,
    TimedOut,
    StoreUnavailable(String),
}

impl EnrollmentFailureReason {
    pub fn code(&self) -> &'static str {
        match self {
            EnrollmentFailureReason::CourseNotFound => "COURSE_NOT_FOUND",
            EnrollmentFailureReason::StudentNotFound => "USER_NOT_FOUND",
            EnrollmentFailureReason::TimedOut => "TIMED_OUT",
            EnrollmentFailureReason::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Returns true if a later retry has a chance to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EnrollmentFailureReason::TimedOut | EnrollmentFailureReason::StoreUnavailable(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentFailure {
    pub course_id: CourseId,
    pub reason: EnrollmentFailureReason,
}

/// Per-course outcome of enrolling one student in a batch of courses.
///
/// Every course of the batch lands in exactly one of the three lists, in
/// batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentOutcome {
    pub enrolled: Vec<CourseId>,
    pub already_enrolled: Vec<CourseId>,
    pub failed: Vec<EnrollmentFailure>,
}

impl EnrollmentOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_enrolled(&mut self, course_id: CourseId) {
        self.enrolled.push(course_id);
    }

    pub fn record_already_enrolled(&mut self, course_id: CourseId) {
        self.already_enrolled.push(course_id);
    }

    pub fn record_failure(&mut self, course_id: CourseId, reason: EnrollmentFailureReason) {
        self.failed.push(EnrollmentFailure { course_id, reason });
    }

    /// True when no course failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.enrolled.len() + self.already_enrolled.len() + self.failed.len()
    }
}
