//! VerifyPaymentHandler - checks a payment signature and enrolls the buyer.

use std::sync::Arc;

use crate::domain::checkout::{
    CheckoutError, EnrollmentOutcome, EnrollmentStatus, PaymentReceipt, SignatureVerifier,
    VerificationOutcome, VerificationState,
};
use crate::domain::foundation::{StateMachine, UserId};
use crate::ports::{EnrollmentJournal, JournalEntry};

use super::EnrollmentEngine;

/// Command carrying the raw receipt fields as posted by the client.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub student_id: UserId,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub course_ids: Option<Vec<String>>,
}

/// Drives a receipt through `Received → SignatureChecked → Enrolled → Notified`.
///
/// Nothing is written before the signature matches. After that, enrollment
/// is forward-only and every per-course result goes to the journal.
pub struct VerifyPaymentHandler {
    verifier: SignatureVerifier,
    engine: Arc<EnrollmentEngine>,
    journal: Arc<dyn EnrollmentJournal>,
}

impl VerifyPaymentHandler {
    pub fn new(
        verifier: SignatureVerifier,
        engine: Arc<EnrollmentEngine>,
        journal: Arc<dyn EnrollmentJournal>,
    ) -> Self {
        Self {
            verifier,
            engine,
            journal,
        }
    }

    pub async fn handle(&self, cmd: VerifyPaymentCommand) -> Result<VerificationOutcome, CheckoutError> {
        let student_id = cmd.student_id.clone();
        let (state, receipt) = match self.admit(cmd) {
            Ok(admitted) => admitted,
            Err((state, error)) => {
                tracing::debug!(%student_id, state = ?state, error = %error, "Receipt rejected");
                return Err(error);
            }
        };

        let enrollment = self.engine.enroll(&receipt.courses, &student_id).await;
        self.journal_outcome(&receipt, &student_id, &enrollment).await;

        let status = EnrollmentStatus::from_outcome(&enrollment);
        let state = match status {
            EnrollmentStatus::Complete => state
                .transition_to(VerificationState::Enrolled)?
                .transition_to(VerificationState::Notified)?,
            EnrollmentStatus::Partial => state.transition_to(VerificationState::EnrollmentPartial)?,
        };

        tracing::info!(
            %student_id,
            order_id = %receipt.order_id,
            enrolled = enrollment.enrolled.len(),
            already_enrolled = enrollment.already_enrolled.len(),
            failed = enrollment.failed.len(),
            state = ?state,
            "Payment verified"
        );

        Ok(VerificationOutcome {
            state,
            status,
            enrollment,
        })
    }

    /// Takes a receipt from `Received` to `SignatureChecked`. Anything that
    /// fails on the way ends in `Rejected` together with the reason.
    fn admit(&self, cmd: VerifyPaymentCommand) -> Result<(VerificationState, PaymentReceipt), Rejection> {
        let state = VerificationState::Received;

        let receipt = PaymentReceipt::parse(cmd.order_id, cmd.payment_id, cmd.signature, cmd.course_ids)
            .map_err(|e| reject(state, e))?;

        if !self
            .verifier
            .verify(&receipt.order_id, &receipt.payment_id, &receipt.signature)
        {
            tracing::warn!(
                student_id = %cmd.student_id,
                order_id = %receipt.order_id,
                payment_id = %receipt.payment_id,
                "Payment signature mismatch"
            );
            return Err(reject(state, CheckoutError::SignatureMismatch));
        }

        let state = state
            .transition_to(VerificationState::SignatureChecked)
            .map_err(|e| reject(state, e.into()))?;
        Ok((state, receipt))
    }

    async fn journal_outcome(&self, receipt: &PaymentReceipt, student_id: &UserId, outcome: &EnrollmentOutcome) {
        let entries = JournalEntry::from_outcome(&receipt.order_id, &receipt.payment_id, student_id, outcome);
        if let Err(e) = self.journal.record(&entries).await {
            tracing::error!(
                order_id = %receipt.order_id,
                entries = entries.len(),
                error = %e,
                "Failed to write enrollment journal"
            );
        }
    }
}

type Rejection = (VerificationState, CheckoutError);

fn reject(from: VerificationState, error: CheckoutError) -> Rejection {
    let state = from.transition_to(VerificationState::Rejected).unwrap_or(from);
    (state, error)
}
