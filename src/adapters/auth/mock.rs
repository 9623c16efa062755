//! Mock session validator for testing.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_test_student("student-token", "user-123");
//!
//! let user = validator.validate("student-token").await?;
//! assert!(user.is_student());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AccountType, AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a token for a student whose email is derived from the id.
    pub fn with_test_student(self, token: impl Into<String>, user_id: &str) -> Self {
        self.with_test_user(token, user_id, AccountType::Student)
    }

    pub fn with_test_user(
        self,
        token: impl Into<String>,
        user_id: &str,
        account_type: AccountType,
    ) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).unwrap(),
            format!("{}@test.example.com", user_id),
            account_type,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_returns_user() {
        let validator = MockSessionValidator::new().with_test_student("tok", "user-1");

        let user = validator.validate("tok").await.unwrap();

        assert_eq!(user.email, "user-1@test.example.com");
        assert!(user.is_student());
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("nope").await.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_test_student("tok", "user-1")
            .with_error(AuthError::TokenExpired);
        assert_eq!(validator.validate("tok").await.unwrap_err(), AuthError::TokenExpired);
    }
}
