//! Lifecycle of a payment receipt through verification and enrollment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

use super::EnrollmentOutcome;

/// Where a receipt is in the verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    Received,
    SignatureChecked,
    Enrolled,
    EnrollmentPartial,
    Notified,
    Rejected,
}

impl StateMachine for VerificationState {
    fn valid_transitions(&self) -> &'static [Self] {
        use VerificationState::*;
        match self {
            Received => &[SignatureChecked, Rejected],
            SignatureChecked => &[Enrolled, EnrollmentPartial, Rejected],
            Enrolled => &[Notified],
            EnrollmentPartial | Notified | Rejected => &[],
        }
    }
}

/// Response-level summary of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Complete,
    Partial,
}

impl EnrollmentStatus {
    pub fn from_outcome(outcome: &EnrollmentOutcome) -> Self {
        if outcome.is_complete() {
            EnrollmentStatus::Complete
        } else {
            EnrollmentStatus::Partial
        }
    }
}

/// What a successful verification hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub state: VerificationState,
    pub status: EnrollmentStatus,
    pub enrollment: EnrollmentOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CourseId;
    use crate::domain::checkout::EnrollmentFailureReason;
    use VerificationState::*;

    #[test]
    fn happy_path_is_legal() {
        let state = Received
            .transition_to(SignatureChecked)
            .and_then(|s| s.transition_to(Enrolled))
            .and_then(|s| s.transition_to(Notified))
            .unwrap();
        assert_eq!(state, Notified);
        assert!(state.is_terminal());
    }

    #[test]
    fn rejection_allowed_before_enrollment_only() {
        assert!(Received.can_transition_to(&Rejected));
        assert!(SignatureChecked.can_transition_to(&Rejected));
        assert!(!Enrolled.can_transition_to(&Rejected));
    }

    #[test]
    fn cannot_skip_signature_check() {
        assert!(Received.transition_to(Enrolled).is_err());
    }

    #[test]
    fn partial_enrollment_is_terminal() {
        assert!(EnrollmentPartial.is_terminal());
    }

    #[test]
    fn status_follows_failures() {
        let mut outcome = EnrollmentOutcome::new();
        outcome.record_enrolled(CourseId::new("a").unwrap());
        assert_eq!(EnrollmentStatus::from_outcome(&outcome), EnrollmentStatus::Complete);
        outcome.record_failure(CourseId::new("b").unwrap(), EnrollmentFailureReason::TimedOut);
        assert_eq!(EnrollmentStatus::from_outcome(&outcome), EnrollmentStatus::Partial);
        assert_eq!(serde_json::to_value(EnrollmentStatus::Partial).unwrap(), "partial");
    }
}
