//! Checkout module - order creation, payment signature verification and
//! batch enrollment.
//!
//! ```text
//! capture ──► provider order ──► client pays ──► receipt
//!                                                  │
//!          Received ─► SignatureChecked ─► Enrolled ─► Notified
//!             │               │    └────► EnrollmentPartial
//!             └──► Rejected ◄─┘
//! ```

mod batch;
mod enrollment;
mod errors;
mod order;
mod receipt;
mod signature;
pub mod templates;
mod verification;

pub use batch::CourseBatch;
pub use enrollment::{EnrollmentFailure, EnrollmentFailureReason, EnrollmentOutcome};
pub use errors::CheckoutError;
pub use order::{Currency, OrderAmount, ReceiptNumber, MINOR_UNITS_PER_MAJOR};
pub use receipt::PaymentReceipt;
pub use signature::{compute_signature, verify_signature, SignatureVerifier};
pub use verification::{EnrollmentStatus, VerificationOutcome, VerificationState};
