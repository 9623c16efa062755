//! HTTP adapter for the payment endpoints.
//!
//! - `POST /api/v1/payment/capturePayment` - Open a provider order for a course batch
//! - `POST /api/v1/payment/verifyPayment` - Verify the receipt and enroll the buyer
//! - `POST /api/v1/payment/sendPaymentSuccessEmail` - Mail the payment receipt

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CheckoutApiError, CheckoutAppState};
pub use routes::checkout_router;
