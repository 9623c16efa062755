//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! Set semantics come from primary keys plus `ON CONFLICT DO NOTHING`;
//! `rows_affected` tells whether a write actually added the member.

mod course_catalog;
mod enrollment_journal;
mod progress_repository;
mod student_directory;

pub use course_catalog::PostgresCourseCatalog;
pub use enrollment_journal::PostgresEnrollmentJournal;
pub use progress_repository::PostgresProgressRepository;
pub use student_directory::PostgresStudentDirectory;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a sqlx error with the operation that failed.
pub(crate) fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", action, err))
}

/// True when the write broke a `REFERENCES` constraint.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map_or(false, |db| db.is_foreign_key_violation())
}

/// Rejects rows that no longer satisfy domain invariants.
pub(crate) fn corrupt_row(what: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", what, detail))
}
