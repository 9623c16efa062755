//! Application configuration.
//!
//! Read from `LEARNHUB__`-prefixed environment variables (and a `.env` file
//! when present) with the `config` and `dotenvy` crates. Sections nest with a
//! double underscore: `LEARNHUB__PAYMENT__RAZORPAY_KEY_ID` fills
//! `payment.razorpay_key_id`.
//!
//! ```no_run
//! use learnhub::config::AppConfig;
//!
//! let config = AppConfig::from_env().expect("configuration");
//! println!("listening on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod email;
mod error;
mod payment;
mod server;

pub use auth::{AuthConfig, MIN_JWT_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "LEARNHUB";

/// Root configuration.
///
/// `server` is optional as a whole; every other section has at least one
/// required secret or URL.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub payment: PaymentConfig,
    pub email: EmailConfig,
}

impl AppConfig {
    /// Loads and validates in one step.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Deserializes the environment without checking values.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section. Fails closed on missing secrets.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.payment.validate(self.is_production())?;
        self.email.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
