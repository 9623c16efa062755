//! SendPaymentReceiptHandler - mails a "payment received" note to the buyer.

use std::sync::Arc;

use crate::domain::checkout::{templates, CheckoutError, OrderAmount};
use crate::domain::foundation::UserId;
use crate::ports::{Mailer, OutgoingEmail, StudentDirectory};

#[derive(Debug, Clone)]
pub struct SendPaymentReceiptCommand {
    pub student_id: UserId,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,

    /// Amount paid, in minor units.
    pub amount: Option<u64>,
}

/// Sends synchronously: the client asked for this mail and wants to know
/// whether it went out.
pub struct SendPaymentReceiptHandler {
    directory: Arc<dyn StudentDirectory>,
    mailer: Arc<dyn Mailer>,
}

impl SendPaymentReceiptHandler {
    pub fn new(directory: Arc<dyn StudentDirectory>, mailer: Arc<dyn Mailer>) -> Self {
        Self { directory, mailer }
    }

    pub async fn handle(&self, cmd: SendPaymentReceiptCommand) -> Result<(), CheckoutError> {
        let order_id = non_blank(cmd.order_id)
            .ok_or_else(|| CheckoutError::validation("orderId", "Please provide all the fields"))?;
        let payment_id = non_blank(cmd.payment_id)
            .ok_or_else(|| CheckoutError::validation("paymentId", "Please provide all the fields"))?;
        let amount = cmd
            .amount
            .filter(|a| *a > 0)
            .map(OrderAmount::from_minor_units)
            .ok_or_else(|| CheckoutError::validation("amount", "Please provide all the fields"))?;

        let student = self
            .directory
            .find_by_id(&cmd.student_id)
            .await
            .map_err(|e| CheckoutError::infrastructure(e.to_string()))?
            .ok_or_else(|| CheckoutError::StudentNotFound(cmd.student_id.clone()))?;

        let email = OutgoingEmail::new(
            student.email.clone(),
            templates::PAYMENT_RECEIVED_SUBJECT,
            templates::payment_success_email(&student.first_name, amount, &order_id, &payment_id),
        );

        self.mailer.send(email).await.map_err(|e| {
            tracing::error!(student_id = %cmd.student_id, %order_id, error = %e, "Payment receipt mail failed");
            CheckoutError::upstream(e.to_string())
        })?;

        tracing::info!(student_id = %cmd.student_id, %order_id, "Payment receipt sent");
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
