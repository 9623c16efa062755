//! Checkout-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | AlreadyEnrolled | 400 |
//! | SignatureMismatch | 400 |
//! | CourseNotFound | 404 |
//! | StudentNotFound | 404 |
//! | OrderCreationFailed | 500 |
//! | UpstreamFailure | 500 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by the checkout flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// A request field is missing or malformed.
    #[error("Field '{field}' is invalid: {message}")]
    ValidationFailed { field: String, message: String },

    /// A requested course does not exist.
    #[error("Course with ID {0} not found")]
    CourseNotFound(CourseId),

    /// The buyer's user record does not exist.
    #[error("Student {0} not found")]
    StudentNotFound(UserId),

    /// The buyer is already on the course roster.
    #[error("Already enrolled in {course_name}")]
    AlreadyEnrolled {
        course_id: CourseId,
        course_name: String,
    },

    /// The payment signature did not match. Carries no detail on purpose.
    #[error("Invalid payment signature")]
    SignatureMismatch,

    /// Order could not be opened with the payment provider.
    #[error("Could not initiate order: {reason}")]
    OrderCreationFailed { reason: String },

    /// Mail provider or another upstream collaborator failed.
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    /// Store failure outside of a per-course enrollment step.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl CheckoutError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CheckoutError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn already_enrolled(course_id: CourseId, course_name: impl Into<String>) -> Self {
        CheckoutError::AlreadyEnrolled {
            course_id,
            course_name: course_name.into(),
        }
    }

    pub fn order_creation_failed(reason: impl Into<String>) -> Self {
        CheckoutError::OrderCreationFailed {
            reason: reason.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        CheckoutError::UpstreamFailure(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CheckoutError::Infrastructure(message.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CheckoutError::CourseNotFound(_) => "COURSE_NOT_FOUND",
            CheckoutError::StudentNotFound(_) => "USER_NOT_FOUND",
            CheckoutError::AlreadyEnrolled { .. } => "ALREADY_ENROLLED",
            CheckoutError::SignatureMismatch => "SIGNATURE_MISMATCH",
            CheckoutError::OrderCreationFailed { .. } => "ORDER_CREATION_FAILED",
            CheckoutError::UpstreamFailure(_) => "UPSTREAM_FAILURE",
            CheckoutError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the client.
    ///
    /// Server-side causes stay in the logs.
    pub fn message(&self) -> String {
        match self {
            CheckoutError::ValidationFailed { message, .. } => message.clone(),
            CheckoutError::OrderCreationFailed { .. } => "Could not initiate order".to_string(),
            CheckoutError::UpstreamFailure(_) => "Could not send email".to_string(),
            CheckoutError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Returns true for failures caused by the server or its collaborators.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::OrderCreationFailed { .. }
                | CheckoutError::UpstreamFailure(_)
                | CheckoutError::Infrastructure(_)
        )
    }
}

impl From<ValidationError> for CheckoutError {
    fn from(err: ValidationError) -> Self {
        CheckoutError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                CheckoutError::validation(field, err.message)
            }
            _ => CheckoutError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_hide_their_cause() {
        let err = CheckoutError::order_creation_failed("connection reset by 10.0.0.7");
        assert_eq!(err.message(), "Could not initiate order");
        assert!(err.is_server_error());
        assert!(err.to_string().contains("10.0.0.7"));
    }

    #[test]
    fn client_errors_show_their_message() {
        let err = CheckoutError::already_enrolled(CourseId::new("c1").unwrap(), "Rust 101");
        assert_eq!(err.message(), "Already enrolled in Rust 101");
        assert_eq!(err.code(), "ALREADY_ENROLLED");
        assert!(!err.is_server_error());
    }

    #[test]
    fn signature_mismatch_is_generic() {
        assert_eq!(
            CheckoutError::SignatureMismatch.message(),
            "Invalid payment signature"
        );
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: CheckoutError = ValidationError::empty_field("courses").into();
        match err {
            CheckoutError::ValidationFailed { field, .. } => assert_eq!(field, "courses"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn database_domain_error_becomes_infrastructure() {
        let err: CheckoutError = DomainError::database("pool timed out").into();
        assert!(matches!(err, CheckoutError::Infrastructure(_)));
    }
}
