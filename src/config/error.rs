//! Configuration errors.
//!
//! Messages name the variable without its `LEARNHUB__` prefix.

use thiserror::Error;

/// Why the process could not obtain a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// A loaded value that fails its constraints.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    // server
    #[error("SERVER__HOST and SERVER__PORT do not form a socket address")]
    InvalidBindAddress,
    #[error("SERVER__PORT must be non-zero")]
    InvalidPort,
    #[error("timeout is zero or above its maximum")]
    InvalidTimeout,
    #[error("CORS origin {0:?} is not a valid header value")]
    InvalidCorsOrigin(String),

    // database
    #[error("DATABASE__URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,
    #[error("DATABASE__MIN_CONNECTIONS exceeds DATABASE__MAX_CONNECTIONS, or the maximum is zero")]
    InvalidPoolSize,
    #[error("DATABASE__MAX_CONNECTIONS may not exceed 100")]
    PoolSizeTooLarge,

    // auth
    #[error("AUTH__JWT_SECRET must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    // payment
    #[error("PAYMENT__RAZORPAY_KEY_ID must start with rzp_")]
    InvalidRazorpayKeyId,
    #[error("PAYMENT__CURRENCY must be a three-letter ISO 4217 code")]
    InvalidCurrency,
    #[error("PAYMENT__API_BASE_URL must use https in production")]
    ProviderUrlMustBeHttps,
    #[error("PAYMENT__RECONCILE_BATCH_SIZE must be between 1 and 1000")]
    InvalidReconcileBatchSize,

    // email
    #[error("EMAIL__RESEND_API_KEY must start with re_")]
    InvalidResendKey,
    #[error("EMAIL__FROM_EMAIL is not an email address")]
    InvalidFromEmail,
    #[error("EMAIL__QUEUE_CAPACITY must be between 1 and 100000")]
    InvalidQueueCapacity,
}
