//! Checkout handlers.
//!
//! ## Commands
//! - Opening a provider order for a batch of courses
//! - Verifying a payment receipt and enrolling the buyer
//! - Sending the payment receipt email
//! - Retrying journaled enrollment failures

mod create_order;
mod enroll_student;
mod reconcile_enrollments;
mod send_payment_receipt;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use enroll_student::EnrollmentEngine;
pub use reconcile_enrollments::{ReconcileEnrollmentsHandler, ReconcileReport};
pub use send_payment_receipt::{SendPaymentReceiptCommand, SendPaymentReceiptHandler};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler};
