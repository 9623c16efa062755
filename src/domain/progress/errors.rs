//! Progress tracking errors.

use thiserror::Error;

use crate::domain::foundation::{CourseId, DomainError, SubSectionId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("Field '{field}' is invalid: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid subsection")]
    SubSectionNotFound(SubSectionId),

    #[error("Invalid course")]
    CourseNotFound(CourseId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ProgressError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProgressError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProgressError::ValidationFailed { .. } => "VALIDATION_FAILED",
            ProgressError::SubSectionNotFound(_) => "SUBSECTION_NOT_FOUND",
            ProgressError::CourseNotFound(_) => "COURSE_NOT_FOUND",
            ProgressError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProgressError::ValidationFailed { message, .. } => message.clone(),
            ProgressError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationError> for ProgressError {
    fn from(err: ValidationError) -> Self {
        ProgressError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for ProgressError {
    fn from(err: DomainError) -> Self {
        ProgressError::Infrastructure(err.to_string())
    }
}
