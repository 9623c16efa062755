//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types, the state machine
//! trait, and the error types shared by every other domain module.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AccountType, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CourseId, JournalEntryId, SubSectionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
