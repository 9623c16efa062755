//! CreateOrderHandler - opens a provider order for a batch of courses.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::checkout::{CheckoutError, CourseBatch, Currency, OrderAmount, ReceiptNumber};
use crate::domain::foundation::UserId;
use crate::ports::{CourseCatalog, CreateOrderRequest, PaymentGateway, ProviderOrder};

/// Command to start checkout for a list of courses.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub buyer_id: UserId,
    pub course_ids: Vec<String>,
}

/// Result of successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: ProviderOrder,

    /// Public key id for the client checkout widget.
    pub key_id: String,
}

/// Validates the batch, totals prices and opens the provider order.
///
/// Courses are checked in submission order so the first missing or already
/// owned course is the one reported. The provider is called last.
pub struct CreateOrderHandler {
    catalog: Arc<dyn CourseCatalog>,
    gateway: Arc<dyn PaymentGateway>,
    currency: Currency,
    provider_timeout: Duration,
}

impl CreateOrderHandler {
    pub fn new(
        catalog: Arc<dyn CourseCatalog>,
        gateway: Arc<dyn PaymentGateway>,
        currency: Currency,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            gateway,
            currency,
            provider_timeout,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, CheckoutError> {
        let batch = CourseBatch::parse("courses", Some(cmd.course_ids))?;

        let mut prices = Vec::with_capacity(batch.len());
        for course_id in &batch {
            let course = self
                .catalog
                .find_by_id(course_id)
                .await
                .map_err(|e| {
                    tracing::error!(course_id = %course_id, error = %e, "Course lookup failed");
                    CheckoutError::order_creation_failed(e.to_string())
                })?
                .ok_or_else(|| CheckoutError::CourseNotFound(course_id.clone()))?;

            if course.has_student(&cmd.buyer_id) {
                return Err(CheckoutError::already_enrolled(course.id, course.name));
            }
            prices.push(course.price);
        }

        let amount = OrderAmount::from_major_prices(prices)?;
        let request = CreateOrderRequest {
            amount,
            currency: self.currency.clone(),
            receipt: ReceiptNumber::generate(),
        };

        let order = match tokio::time::timeout(self.provider_timeout, self.gateway.create_order(request)).await {
            Ok(Ok(order)) => order,
            Ok(Err(e)) => {
                tracing::error!(buyer_id = %cmd.buyer_id, error = %e, "Provider rejected order");
                return Err(CheckoutError::order_creation_failed(e.to_string()));
            }
            Err(_) => {
                tracing::error!(
                    buyer_id = %cmd.buyer_id,
                    timeout_ms = self.provider_timeout.as_millis() as u64,
                    "Provider order timed out"
                );
                return Err(CheckoutError::order_creation_failed("provider timed out"));
            }
        };

        tracing::info!(
            buyer_id = %cmd.buyer_id,
            order_id = %order.id,
            amount = order.amount.minor_units(),
            courses = batch.len(),
            "Order created"
        );

        Ok(CreateOrderResult {
            order,
            key_id: self.gateway.key_id().to_string(),
        })
    }
}
