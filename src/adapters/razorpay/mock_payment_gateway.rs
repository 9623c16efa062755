//! Mock payment gateway for testing.
//!
//! Supports error injection, an artificial delay and call tracking so
//! handler tests can assert on what reached the provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{CreateOrderRequest, PaymentError, PaymentGateway, ProviderOrder};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let gateway = MockPaymentGateway::new();
/// gateway.set_error(PaymentError::network("down"));
/// assert!(gateway.create_order(request).await.is_err());
/// ```
#[derive(Clone)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
    key_id: String,
}

#[derive(Default)]
struct MockState {
    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Delay before answering, to exercise timeouts.
    delay: Option<Duration>,

    /// Requests received, in order.
    requests: Vec<CreateOrderRequest>,

    order_counter: u32,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::with_key_id("rzp_test_mock")
    }

    pub fn with_key_id(key_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            key_id: key_id.into(),
        }
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Delay every answer by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().delay = Some(delay);
    }

    /// All order requests received so far.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<ProviderOrder, PaymentError> {
        let (delay, result) = {
            let mut state = self.inner.lock().unwrap();
            state.requests.push(request.clone());
            let result = match state.next_error.take() {
                Some(err) => Err(err),
                None => {
                    state.order_counter += 1;
                    Ok(ProviderOrder {
                        id: format!("order_mock_{}", state.order_counter),
                        amount: request.amount,
                        currency: request.currency,
                        receipt: request.receipt.as_str().to_string(),
                        status: "created".to_string(),
                    })
                }
            };
            (state.delay, result)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }
}
