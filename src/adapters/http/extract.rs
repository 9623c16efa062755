//! Request body extractor with the API's JSON error shape.
//!
//! `axum::Json` answers a bad body with a plain-text 4xx. `ApiJson` runs the
//! same extraction but rejects with a 400 carrying the usual
//! `{success:false, errorCode, message}` body.

use std::future::Future;
use std::pin::Pin;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use super::checkout::ErrorResponse;

/// JSON request body. Use in place of `axum::Json` for handler inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    fn from_request<'life0, 'async_trait>(
        req: Request,
        state: &'life0 S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(ApiJson(value)),
                Err(rejection) => Err(BodyRejection(rejection)),
            }
        })
    }
}

/// A body that is not JSON or does not fit the request type.
#[derive(Debug)]
pub struct BodyRejection(JsonRejection);

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!(detail = %self.0.body_text(), "Rejected request body");
        let body = ErrorResponse::new("VALIDATION_FAILED", "Invalid request body");
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Order {
        courses: Vec<String>,
    }

    async fn count(ApiJson(order): ApiJson<Order>) -> String {
        order.courses.len().to_string()
    }

    async fn send(content_type: &str, body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(count));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("Content-Type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn well_formed_body_reaches_handler() {
        let (status, body) = send("application/json", r#"{"courses":["a","b"]}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "2");
    }

    #[tokio::test]
    async fn wrong_field_type_is_400_with_json_error() {
        let (status, body) = send("application/json", r#"{"courses":"a"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], "VALIDATION_FAILED");
        assert_eq!(json["message"], "Invalid request body");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, _) = send("application/json", "{courses:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let (status, _) = send("text/plain", r#"{"courses":[]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
