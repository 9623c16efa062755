//! Client-submitted proof of payment.

use super::{CheckoutError, CourseBatch};

/// Receipt the client posts after paying the provider.
///
/// Construction rejects missing or blank fields, so a `PaymentReceipt` is
/// always complete before any signature work happens. Values are kept
/// exactly as posted; the signature is computed over the raw ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub courses: CourseBatch,
}

impl PaymentReceipt {
    pub fn parse(
        order_id: Option<String>,
        payment_id: Option<String>,
        signature: Option<String>,
        courses: Option<Vec<String>>,
    ) -> Result<Self, CheckoutError> {
        let order_id = required("razorpay_order_id", order_id)?;
        let payment_id = required("razorpay_payment_id", payment_id)?;
        let signature = required("razorpay_signature", signature)?;
        let courses = CourseBatch::parse("courses", courses)
            .map_err(|_| CheckoutError::validation("courses", "Payment verification failed"))?;

        Ok(Self {
            order_id,
            payment_id,
            signature,
            courses,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, CheckoutError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CheckoutError::validation(field, "Payment verification failed")),
    }
}
