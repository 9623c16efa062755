//! Bearer token validation port.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Turns a session token into the caller's identity and account type.
///
/// The auth middleware calls this once per request that carries a token in
/// the `Authorization` header or the `token` cookie. Implementations return:
/// - `AuthError::InvalidToken` for malformed, badly signed or unknown tokens
/// - `AuthError::TokenExpired` once the `exp` claim has passed
/// - `AuthError::ServiceUnavailable` when the check itself could not run
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// `token` is the bare token, without any `Bearer ` prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
