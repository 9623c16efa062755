//! Razorpay payment gateway adapters.

mod mock_payment_gateway;
mod razorpay_adapter;

pub use mock_payment_gateway::MockPaymentGateway;
pub use razorpay_adapter::{RazorpayConfig, RazorpayGateway};
