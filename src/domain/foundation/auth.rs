//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a bearer token.
//! Any token issuer can populate them via the `SessionValidator` port.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Kind of account a user holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Student,
    Instructor,
    Admin,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Student => "Student",
            AccountType::Instructor => "Instructor",
            AccountType::Admin => "Admin",
        }
    }
}

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Account type from the token claims.
    pub account_type: AccountType,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            email: email.into(),
            account_type,
        }
    }

    /// Returns true if the user may buy courses and record progress.
    pub fn is_student(&self) -> bool {
        self.account_type == AccountType::Student
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Token is invalid")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// User is authenticated but lacks the required account type.
    #[error("This route is restricted to {0} accounts")]
    WrongAccountType(&'static str),

    /// The authentication backend is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
