//! HTTP handlers for the payment endpoints.
//!
//! These handlers connect axum routes to the checkout command handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireStudent;
use crate::application::{
    CreateOrderCommand, CreateOrderHandler, SendPaymentReceiptCommand, SendPaymentReceiptHandler,
    VerifyPaymentCommand, VerifyPaymentHandler,
};
use crate::domain::checkout::CheckoutError;

use super::dto::{
    CapturePaymentRequest, CapturePaymentResponse, ErrorResponse, SendPaymentSuccessEmailRequest,
    SuccessResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the payment routes.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub create_order: Arc<CreateOrderHandler>,
    pub verify_payment: Arc<VerifyPaymentHandler>,
    pub send_receipt: Arc<SendPaymentReceiptHandler>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/payment/capturePayment - Open a provider order for a course batch
pub async fn capture_payment(
    State(state): State<CheckoutAppState>,
    RequireStudent(user): RequireStudent,
    ApiJson(request): ApiJson<CapturePaymentRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let cmd = CreateOrderCommand {
        buyer_id: user.id,
        course_ids: request.courses,
    };

    let result = state.create_order.handle(cmd).await?;
    Ok(Json(CapturePaymentResponse::from(result)))
}

/// POST /api/v1/payment/verifyPayment - Verify the receipt and enroll the buyer
pub async fn verify_payment(
    State(state): State<CheckoutAppState>,
    RequireStudent(user): RequireStudent,
    ApiJson(request): ApiJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let cmd = VerifyPaymentCommand {
        student_id: user.id,
        order_id: request.razorpay_order_id,
        payment_id: request.razorpay_payment_id,
        signature: request.razorpay_signature,
        course_ids: request.courses,
    };

    let outcome = state.verify_payment.handle(cmd).await?;
    Ok(Json(VerifyPaymentResponse::from(outcome)))
}

/// POST /api/v1/payment/sendPaymentSuccessEmail - Mail the payment receipt
pub async fn send_payment_success_email(
    State(state): State<CheckoutAppState>,
    RequireStudent(user): RequireStudent,
    ApiJson(request): ApiJson<SendPaymentSuccessEmailRequest>,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let cmd = SendPaymentReceiptCommand {
        student_id: user.id,
        order_id: request.order_id,
        payment_id: request.payment_id,
        amount: request.amount,
    };

    state.send_receipt.handle(cmd).await?;
    Ok(Json(SuccessResponse::with_message("Payment receipt sent")))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for checkout errors.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            CheckoutError::ValidationFailed { .. }
            | CheckoutError::AlreadyEnrolled { .. }
            | CheckoutError::SignatureMismatch => StatusCode::BAD_REQUEST,
            CheckoutError::CourseNotFound(_) | CheckoutError::StudentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CheckoutError::OrderCreationFailed { .. }
            | CheckoutError::UpstreamFailure(_)
            | CheckoutError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if self.0.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "Checkout request failed");
        }

        let body = ErrorResponse::new(self.0.code(), self.0.message());
        (status, Json(body)).into_response()
    }
}
