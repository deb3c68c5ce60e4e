use std::sync::Arc;

use voyago_core::identity::CredentialVerifier;
use voyago_core::payment::{PaymentAdapter, PaymentMethod};
use voyago_core::session::IdentitySession;
use voyago_core::storage::StorageError;

use crate::ledger::{BookingLedger, LedgerError};
use crate::lifecycle::{BookingAttempt, LifecycleError, LifecycleState};
use crate::models::{BookingDetails, BookingRecord, BookingStatus, NewBooking};

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("No identity present to stamp the booking")]
    IdentityRequired,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Drives a booking attempt through the external identity and payment
/// steps. Failures of either step are not surfaced as errors: they are
/// ordinary `Abandoned` outcomes, and the user starts a fresh attempt.
pub struct CheckoutOrchestrator {
    verifier: Arc<dyn CredentialVerifier>,
    payments: Arc<dyn PaymentAdapter>,
}

impl CheckoutOrchestrator {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, payments: Arc<dyn PaymentAdapter>) -> Self {
        Self { verifier, payments }
    }

    /// Resolve the `AuthRequired` state through the credential verifier.
    /// On success the verified identity is persisted into the session and
    /// the attempt moves to review; on failure the attempt is abandoned.
    /// Returns whether the login succeeded.
    pub async fn login(
        &self,
        attempt: &mut BookingAttempt,
        session: &mut IdentitySession,
        identifier: &str,
        secret: &str,
    ) -> Result<bool, CheckoutError> {
        if attempt.state() != LifecycleState::AuthRequired {
            return Err(LifecycleError::InvalidTransition {
                from: attempt.state(),
                to: LifecycleState::ReviewingConfirmation,
            }
            .into());
        }

        match self.verifier.verify_credentials(identifier, secret).await {
            Ok(identity) => {
                session.set_identity(identity)?;
                attempt.identity_verified()?;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!("Identity step failed: {}", err);
                attempt.abandon()?;
                Ok(false)
            }
        }
    }

    /// Resolve the `AwaitingPayment` state. Charges the breakdown frozen
    /// in the attempt; on success completes the attempt and appends the
    /// stamped record to the ledger. A declined charge abandons the
    /// attempt and returns `None`.
    pub async fn complete_payment(
        &self,
        attempt: &mut BookingAttempt,
        ledger: &mut BookingLedger,
        session: &IdentitySession,
        details: BookingDetails,
        method: &PaymentMethod,
    ) -> Result<Option<BookingRecord>, CheckoutError> {
        if attempt.state() != LifecycleState::AwaitingPayment {
            return Err(LifecycleError::InvalidTransition {
                from: attempt.state(),
                to: LifecycleState::Completed,
            }
            .into());
        }
        let user_email = session
            .current_identity()
            .ok_or(CheckoutError::IdentityRequired)?
            .to_string();

        let quote = attempt.quote()?;
        match self.payments.charge(quote.total_amount, method).await {
            Ok(()) => {
                let breakdown = attempt.payment_succeeded()?;
                let record = ledger.append(NewBooking {
                    user_email,
                    status: BookingStatus::Confirmed,
                    details,
                    price: breakdown.total_amount,
                })?;
                Ok(Some(record))
            }
            Err(err) => {
                tracing::warn!("Payment step failed: {}", err);
                attempt.abandon()?;
                Ok(None)
            }
        }
    }

    /// The user closed the identity or payment dialog. Identical outcome
    /// to a failed external step.
    pub fn dismiss(&self, attempt: &mut BookingAttempt) -> Result<(), CheckoutError> {
        attempt.abandon()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use voyago_catalog::Catalog;
    use voyago_core::identity::MockCredentialVerifier;
    use voyago_core::payment::MockPaymentAdapter;
    use voyago_core::storage::MemoryStore;

    fn orchestrator() -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(
            Arc::new(MockCredentialVerifier),
            Arc::new(MockPaymentAdapter::new()),
        )
    }

    fn upi() -> PaymentMethod {
        PaymentMethod::Upi {
            vpa: "traveler@upi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_payment_requires_identity() {
        let store = Arc::new(MemoryStore::new());
        let session = IdentitySession::load(store.clone()).unwrap();
        let mut ledger = BookingLedger::load(store).unwrap();
        let catalog = Catalog::with_sample_data();

        let train = catalog.find_by_code("12951").unwrap();
        let mut attempt = BookingAttempt::new(train);
        attempt
            .select_tier(train.tier("AC 3 Tier").unwrap())
            .unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.proceed(true).unwrap();
        attempt.confirm().unwrap();

        let details = BookingDetails::Train {
            origin: "Mumbai".to_string(),
            destination: "Delhi".to_string(),
            travel_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            passengers: 1,
            train_number: "12951".to_string(),
            train_class: "AC 3 Tier".to_string(),
        };
        let result = orchestrator()
            .complete_payment(&mut attempt, &mut ledger, &session, details, &upi())
            .await;
        assert!(matches!(result, Err(CheckoutError::IdentityRequired)));
        assert!(ledger.records().is_empty());
    }

    #[tokio::test]
    async fn test_login_outside_auth_required_fails() {
        let store = Arc::new(MemoryStore::new());
        let mut session = IdentitySession::load(store).unwrap();
        let catalog = Catalog::with_sample_data();

        let train = catalog.find_by_code("12951").unwrap();
        let mut attempt = BookingAttempt::new(train);

        let result = orchestrator()
            .login(&mut attempt, &mut session, "a@b.com", "secret1")
            .await;
        assert!(matches!(
            result,
            Err(CheckoutError::Lifecycle(
                LifecycleError::InvalidTransition { .. }
            ))
        ));
        assert_eq!(attempt.state(), LifecycleState::Selecting);
    }

    #[tokio::test]
    async fn test_dismiss_abandons_attempt() {
        let catalog = Catalog::with_sample_data();
        let train = catalog.find_by_code("12951").unwrap();
        let mut attempt = BookingAttempt::new(train);

        orchestrator().dismiss(&mut attempt).unwrap();
        assert_eq!(attempt.state(), LifecycleState::Abandoned);
    }
}
