//! Student profile fields used for notifications.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// The subset of a user document needed to address mail to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl StudentProfile {
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}
