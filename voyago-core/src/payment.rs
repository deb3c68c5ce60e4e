use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payment instrument chosen in the payment step. The core never inspects
/// the captured details; they exist only to be handed to the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card {
        number: String,
        expiry: String,
        cvv: String,
        holder: String,
    },
    Upi {
        vpa: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
}

/// External payment step. The core consumes only the success/failure
/// outcome; a declined charge is handled as an abandoned attempt, never
/// retried inside the core.
#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    async fn charge(&self, amount: i64, method: &PaymentMethod) -> Result<(), PaymentError>;
}

pub struct MockPaymentAdapter {
    /// Charges of exactly this amount are declined, for driving the
    /// failure path in tests.
    decline_amount: Option<i64>,
}

impl MockPaymentAdapter {
    pub fn new() -> Self {
        Self {
            decline_amount: None,
        }
    }

    pub fn declining(amount: i64) -> Self {
        Self {
            decline_amount: Some(amount),
        }
    }
}

impl Default for MockPaymentAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentAdapter for MockPaymentAdapter {
    async fn charge(&self, amount: i64, _method: &PaymentMethod) -> Result<(), PaymentError> {
        if self.decline_amount == Some(amount) {
            return Err(PaymentError::Declined(format!(
                "charge of {} refused by gateway",
                amount
            )));
        }

        tracing::info!("Charged {} successfully", amount);
        Ok(())
    }
}
