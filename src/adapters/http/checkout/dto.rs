//! HTTP DTOs for the payment endpoints.
//!
//! Field names follow the JSON the storefront client already sends, which is
//! why the verify request keeps the provider's snake_case names.

use serde::{Deserialize, Serialize};

use crate::application::CreateOrderResult;
use crate::domain::checkout::{EnrollmentFailure, EnrollmentStatus, VerificationOutcome};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /payment/capturePayment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CapturePaymentRequest {
    #[serde(default)]
    pub courses: Vec<String>,
}

/// Body of `POST /payment/verifyPayment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

/// Body of `POST /payment/sendPaymentSuccessEmail`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentSuccessEmailRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    /// Amount in minor units, as reported by the checkout widget.
    #[serde(default)]
    pub amount: Option<u64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Order details the client needs to open the checkout widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentResponse {
    pub success: bool,
    /// Public provider key id.
    pub key: String,
    pub order_id: String,
    /// Minor units.
    pub amount: u64,
    pub currency: String,
}

impl From<CreateOrderResult> for CapturePaymentResponse {
    fn from(result: CreateOrderResult) -> Self {
        Self {
            success: true,
            key: result.key_id,
            order_id: result.order.id,
            amount: result.order.amount.minor_units(),
            currency: result.order.currency.as_str().to_string(),
        }
    }
}

/// Per-course failure entry in a verification response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedCourseResponse {
    pub course_id: String,
    pub code: String,
}

impl From<&EnrollmentFailure> for FailedCourseResponse {
    fn from(failure: &EnrollmentFailure) -> Self {
        Self {
            course_id: failure.course_id.to_string(),
            code: failure.reason.code().to_string(),
        }
    }
}

/// Verification result. Partial enrollment is still a 200; `status` tells
/// the client whether every course went through.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub status: EnrollmentStatus,
    pub enrolled: Vec<String>,
    pub already_enrolled: Vec<String>,
    pub failed: Vec<FailedCourseResponse>,
}

impl From<VerificationOutcome> for VerifyPaymentResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        let message = match outcome.status {
            EnrollmentStatus::Complete => "Payment Verified",
            EnrollmentStatus::Partial => "Payment Verified, some courses could not be enrolled",
        };

        Self {
            success: true,
            message: message.to_string(),
            status: outcome.status,
            enrolled: outcome
                .enrollment
                .enrolled
                .iter()
                .map(ToString::to_string)
                .collect(),
            already_enrolled: outcome
                .enrollment
                .already_enrolled
                .iter()
                .map(ToString::to_string)
                .collect(),
            failed: outcome
                .enrollment
                .failed
                .iter()
                .map(FailedCourseResponse::from)
                .collect(),
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Error body shared by every API module.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
