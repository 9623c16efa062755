//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - HS256 session token validation
//! - `email` - Resend mail delivery
//! - `http` - axum REST API
//! - `memory` - in-memory stores for tests and local runs
//! - `notifications` - background notification dispatch
//! - `postgres` - PostgreSQL stores
//! - `razorpay` - Razorpay orders API

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod notifications;
pub mod postgres;
pub mod razorpay;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use email::{RecordingMailer, ResendConfig, ResendMailer};
pub use memory::{
    InMemoryCourseCatalog, InMemoryEnrollmentJournal, InMemoryProgressRepository,
    InMemoryStudentDirectory,
};
pub use notifications::{BackgroundNotificationDispatcher, RecordingDispatcher};
pub use postgres::{
    PostgresCourseCatalog, PostgresEnrollmentJournal, PostgresProgressRepository,
    PostgresStudentDirectory,
};
pub use razorpay::{MockPaymentGateway, RazorpayConfig, RazorpayGateway};
