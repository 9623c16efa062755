//! Axum router configuration for the payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    capture_payment, send_payment_success_email, verify_payment, CheckoutAppState,
};

/// Create the payment API router.
///
/// # Routes (student accounts only)
/// - `POST /capturePayment` - Open a provider order
/// - `POST /verifyPayment` - Verify the receipt and enroll
/// - `POST /sendPaymentSuccessEmail` - Mail the payment receipt
pub fn checkout_routes() -> Router<CheckoutAppState> {
    Router::new()
        .route("/capturePayment", post(capture_payment))
        .route("/verifyPayment", post(verify_payment))
        .route("/sendPaymentSuccessEmail", post(send_payment_success_email))
}

/// Create the complete payment module router, mounted under `/payment`.
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new().nest("/payment", checkout_routes())
}
