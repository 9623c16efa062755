//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity
//!
//! - `SessionValidator` - Bearer token validation
//!
//! ## Stores
//!
//! - `CourseCatalog` - Courses, lectures and course rosters
//! - `StudentDirectory` - User records and enrolled-course sets
//! - `CourseProgressRepository` - Completed lectures per course
//! - `EnrollmentJournal` - Per-course enrollment log for reconciliation
//!
//! ## External Services
//!
//! - `PaymentGateway` - Provider order creation
//! - `Mailer` - Synchronous email delivery
//! - `NotificationDispatcher` - Fire-and-forget email delivery

mod course_catalog;
mod enrollment_journal;
mod mailer;
mod payment_gateway;
mod progress_repository;
mod session_validator;
mod student_directory;

pub use course_catalog::CourseCatalog;
pub use enrollment_journal::{EnrollmentJournal, JournalEntry, JournalStatus};
pub use mailer::{MailError, Mailer, NotificationDispatcher, OutgoingEmail};
pub use payment_gateway::{
    CreateOrderRequest, PaymentError, PaymentErrorCode, PaymentGateway, ProviderOrder,
};
pub use progress_repository::CourseProgressRepository;
pub use session_validator::SessionValidator;
pub use student_directory::StudentDirectory;
