//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Razorpay credentials and checkout limits.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Public key id, shown to the checkout widget
    pub razorpay_key_id: String,

    /// Secret used for API calls and payment signatures
    pub razorpay_key_secret: SecretString,

    /// ISO 4217 code orders are opened in
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on the order creation call
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,

    /// Upper bound on each course's enrollment writes
    #[serde(default = "default_enrollment_timeout")]
    pub enrollment_timeout_secs: u64,

    /// Seconds between retries of failed enrollments. Zero disables them.
    #[serde(default = "default_reconcile_interval")]
    pub reconcile_interval_secs: u64,

    /// Journal entries retried per run
    #[serde(default = "default_reconcile_batch_size")]
    pub reconcile_batch_size: u32,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn enrollment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrollment_timeout_secs)
    }

    /// `None` when reconciliation is switched off.
    pub fn reconcile_interval(&self) -> Option<Duration> {
        (self.reconcile_interval_secs > 0).then(|| Duration::from_secs(self.reconcile_interval_secs))
    }

    /// Validate payment configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__RAZORPAY_KEY_SECRET",
            ));
        }
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }
        if production && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::ProviderUrlMustBeHttps);
        }
        if self.provider_timeout_secs == 0 || self.enrollment_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.reconcile_batch_size == 0 || self.reconcile_batch_size > 1000 {
            return Err(ValidationError::InvalidReconcileBatchSize);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            razorpay_key_id: String::new(),
            razorpay_key_secret: SecretString::new(String::new()),
            currency: default_currency(),
            api_base_url: default_api_base_url(),
            provider_timeout_secs: default_provider_timeout(),
            enrollment_timeout_secs: default_enrollment_timeout(),
            reconcile_interval_secs: default_reconcile_interval(),
            reconcile_batch_size: default_reconcile_batch_size(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

fn default_enrollment_timeout() -> u64 {
    5
}

fn default_reconcile_interval() -> u64 {
    300
}

fn default_reconcile_batch_size() -> u32 {
    100
}
