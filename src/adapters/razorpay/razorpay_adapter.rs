//! Razorpay payment gateway adapter.
//!
//! Opens orders through `POST /v1/orders` with HTTP basic auth
//! (`key_id:key_secret`). Signature verification of the resulting payment is
//! pure and lives in the checkout domain; this adapter only talks to the API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::new(key_id, key_secret).with_timeout(Duration::from_secs(10));
//! let gateway = RazorpayGateway::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::checkout::{Currency, OrderAmount};
use crate::ports::{CreateOrderRequest, PaymentError, PaymentErrorCode, PaymentGateway, ProviderOrder};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (`rzp_live_...` or `rzp_test_...`).
    key_id: String,

    key_secret: SecretString,

    api_base_url: String,

    timeout: Duration,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Razorpay implementation of `PaymentGateway`.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::new(PaymentErrorCode::ProviderError, e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[derive(Debug, Serialize)]
struct OrderBody<'a> {
    amount: u64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: u64,
    currency: String,
    #[serde(default)]
    receipt: Option<String>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorEnvelope {
    error: RazorpayErrorBody,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    code: String,
    #[serde(default)]
    description: String,
}

/// Maps a non-2xx response to a `PaymentError`.
fn error_from_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<RazorpayErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format!("Razorpay API error ({})", status.as_u16()));

    let code = match status.as_u16() {
        401 => PaymentErrorCode::AuthenticationError,
        400 => PaymentErrorCode::InvalidRequest,
        429 => PaymentErrorCode::RateLimitExceeded,
        _ => PaymentErrorCode::ProviderError,
    };

    let err = PaymentError::new(code, message);
    match parsed {
        Some(e) => err.with_provider_code(e.error.code),
        None => err,
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<ProviderOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);
        let body = OrderBody {
            amount: request.amount.minor_units(),
            currency: request.currency.as_str(),
            receipt: request.receipt.as_str(),
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::timeout(e.to_string())
                } else {
                    PaymentError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), error = %error_text, "Razorpay create_order failed");
            return Err(error_from_response(status, &error_text));
        }

        let order: RazorpayOrder = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Razorpay response: {}", e))
        })?;

        let currency = Currency::new(order.currency)
            .map_err(|e| PaymentError::provider(format!("Unexpected currency: {}", e)))?;

        tracing::debug!(order_id = %order.id, amount = order.amount, "Razorpay order created");

        Ok(ProviderOrder {
            id: order.id,
            amount: OrderAmount::from_minor_units(order.amount),
            currency,
            receipt: order.receipt.unwrap_or_else(|| request.receipt.as_str().to_string()),
            status: order.status,
        })
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::ReceiptNumber;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};

    fn request(minor: u64) -> CreateOrderRequest {
        CreateOrderRequest {
            amount: OrderAmount::from_minor_units(minor),
            currency: Currency::inr(),
            receipt: ReceiptNumber::generate(),
        }
    }

    /// Starts a local stand-in for the orders endpoint and returns its base URL.
    async fn fake_razorpay() -> String {
        async fn create(
            headers: HeaderMap,
            Json(body): Json<serde_json::Value>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            // base64("rzp_test_key:secret")
            let expected = "Basic cnpwX3Rlc3Rfa2V5OnNlY3JldA==";
            if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected) {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": {"code": "BAD_REQUEST_ERROR", "description": "Authentication failed"}
                    })),
                );
            }
            if body["amount"].as_u64().unwrap_or(0) < 100 {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                        "error": {"code": "BAD_REQUEST_ERROR", "description": "Order amount less than minimum amount allowed"}
                    })),
                );
            }
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "id": "order_EKwxwAgItmmXdp",
                    "entity": "order",
                    "amount": body["amount"],
                    "amount_paid": 0,
                    "amount_due": body["amount"],
                    "currency": body["currency"],
                    "receipt": body["receipt"],
                    "status": "created",
                    "attempts": 0,
                    "created_at": 1_582_628_071
                })),
            )
        }

        let app = Router::new().route("/v1/orders", post(create));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn gateway(base_url: &str, secret: &str) -> RazorpayGateway {
        let config = RazorpayConfig::new("rzp_test_key", SecretString::new(secret.to_string()))
            .with_base_url(base_url);
        RazorpayGateway::new(config).unwrap()
    }

    #[tokio::test]
    async fn creates_order_with_basic_auth() {
        let base = fake_razorpay().await;
        let order = gateway(&base, "secret").create_order(request(2500)).await.unwrap();

        assert_eq!(order.id, "order_EKwxwAgItmmXdp");
        assert_eq!(order.amount.minor_units(), 2500);
        assert_eq!(order.currency.as_str(), "INR");
        assert!(order.receipt.starts_with("receipt_"));
    }

    #[tokio::test]
    async fn wrong_secret_is_authentication_error() {
        let base = fake_razorpay().await;
        let err = gateway(&base, "wrong").create_order(request(2500)).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::AuthenticationError);
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn provider_description_is_kept() {
        let base = fake_razorpay().await;
        let err = gateway(&base, "secret").create_order(request(50)).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert!(err.message.contains("minimum amount"));
        assert_eq!(err.provider_code.as_deref(), Some("BAD_REQUEST_ERROR"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_network_error() {
        let err = gateway("http://127.0.0.1:9", "secret")
            .create_order(request(2500))
            .await
            .unwrap_err();
        assert!(err.retryable);
    }

    #[test]
    fn unparseable_error_body_uses_status() {
        let err = error_from_response(reqwest::StatusCode::BAD_GATEWAY, "<html>");
        assert_eq!(err.code, PaymentErrorCode::ProviderError);
        assert_eq!(err.message, "Razorpay API error (502)");
    }

    #[test]
    fn config_debug_hides_secret() {
        let config = RazorpayConfig::new("rzp_test_key", SecretString::new("s3cr3t".into()));
        assert!(!format!("{:?}", config).contains("s3cr3t"));
    }
}
