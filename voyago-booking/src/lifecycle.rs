use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyago_catalog::{Product, ProductType, Tier};

use crate::pricing::{compute_breakdown, tax_rate_percent, PriceBreakdown, PricingError};

/// States of a single booking attempt. `Completed` and `Abandoned` are
/// terminal; `Abandoned` is reachable from every non-terminal state, so
/// an attempt can never be stuck waiting on an external step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Selecting,
    AuthRequired,
    ReviewingConfirmation,
    AwaitingPayment,
    Completed,
    Abandoned,
}

impl LifecycleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Completed | LifecycleState::Abandoned)
    }
}

/// Tier choice frozen into the attempt: label plus the unit price at
/// selection time, so what was reviewed is what gets charged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierSelection {
    pub label: String,
    pub unit_price: i64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LifecycleError {
    #[error("A tier and quantity must be selected before booking")]
    IncompleteSelection,

    #[error("Tier and quantity are locked once the booking flow has started")]
    SelectionLocked,

    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One in-progress booking interaction, owned by the flow that created
/// it. Discarded once a terminal state is reached; abandoned attempts are
/// never persisted.
#[derive(Debug, Clone)]
pub struct BookingAttempt {
    product_id: Uuid,
    product_type: ProductType,
    tier: Option<TierSelection>,
    quantity: Option<u32>,
    state: LifecycleState,
}

impl BookingAttempt {
    pub fn new(product: &Product) -> Self {
        Self {
            product_id: product.id,
            product_type: product.product_type,
            tier: None,
            quantity: None,
            state: LifecycleState::Selecting,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn tier(&self) -> Option<&TierSelection> {
        self.tier.as_ref()
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    /// Choose or change the tier. Allowed any number of times while still
    /// `Selecting`; locked afterwards so the reviewed price cannot drift
    /// from the charged one.
    pub fn select_tier(&mut self, tier: &Tier) -> Result<(), LifecycleError> {
        if self.state != LifecycleState::Selecting {
            return Err(LifecycleError::SelectionLocked);
        }
        self.tier = Some(TierSelection {
            label: tier.label.clone(),
            unit_price: tier.unit_price,
        });
        Ok(())
    }

    /// Set the passenger or night count. Same locking rule as the tier.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), LifecycleError> {
        if self.state != LifecycleState::Selecting {
            return Err(LifecycleError::SelectionLocked);
        }
        if quantity == 0 {
            return Err(PricingError::InvalidQuantity(quantity).into());
        }
        self.quantity = Some(quantity);
        Ok(())
    }

    /// Price the current selection without changing state. Used for the
    /// review summary and for the final charge amount.
    pub fn quote(&self) -> Result<PriceBreakdown, LifecycleError> {
        let tier = self.tier.as_ref().ok_or(LifecycleError::IncompleteSelection)?;
        let quantity = self.quantity.ok_or(LifecycleError::IncompleteSelection)?;
        Ok(compute_breakdown(
            tier.unit_price,
            quantity,
            tax_rate_percent(self.product_type),
        )?)
    }

    /// "Book now": leaves `Selecting` once a tier and quantity are held.
    /// Routes through `AuthRequired` when no identity is present.
    pub fn proceed(&mut self, identity_present: bool) -> Result<LifecycleState, LifecycleError> {
        let to = if identity_present {
            LifecycleState::ReviewingConfirmation
        } else {
            LifecycleState::AuthRequired
        };
        if self.state != LifecycleState::Selecting {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        if self.tier.is_none() || self.quantity.is_none() {
            return Err(LifecycleError::IncompleteSelection);
        }

        self.state = to;
        tracing::debug!("Booking attempt advanced to {:?}", self.state);
        Ok(self.state)
    }

    /// Identity step succeeded. The selection was validated before
    /// entering `AuthRequired` and is not re-checked.
    pub fn identity_verified(&mut self) -> Result<(), LifecycleError> {
        self.transition(
            LifecycleState::AuthRequired,
            LifecycleState::ReviewingConfirmation,
        )
    }

    /// User confirmed the reviewed details.
    pub fn confirm(&mut self) -> Result<(), LifecycleError> {
        self.transition(
            LifecycleState::ReviewingConfirmation,
            LifecycleState::AwaitingPayment,
        )
    }

    /// Payment step reported success. Returns the breakdown computed at
    /// this instant from the frozen tier and quantity; the ledger record
    /// must carry exactly this total.
    pub fn payment_succeeded(&mut self) -> Result<PriceBreakdown, LifecycleError> {
        if self.state != LifecycleState::AwaitingPayment {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to: LifecycleState::Completed,
            });
        }
        let breakdown = self.quote()?;
        self.state = LifecycleState::Completed;
        Ok(breakdown)
    }

    /// Explicit user cancel, a closed dialog, or a failed external step.
    /// All land here identically.
    pub fn abandon(&mut self) -> Result<(), LifecycleError> {
        if self.state.is_terminal() {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to: LifecycleState::Abandoned,
            });
        }
        tracing::debug!("Booking attempt abandoned from {:?}", self.state);
        self.state = LifecycleState::Abandoned;
        Ok(())
    }

    fn transition(
        &mut self,
        from: LifecycleState,
        to: LifecycleState,
    ) -> Result<(), LifecycleError> {
        if self.state != from {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        tracing::debug!("Booking attempt advanced to {:?}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyago_catalog::Catalog;

    fn flight_attempt() -> (BookingAttempt, Tier) {
        let catalog = Catalog::with_sample_data();
        let flight = catalog.find_by_code("6E-123").unwrap();
        let tier = flight.tier("Economy").unwrap().clone();
        (BookingAttempt::new(flight), tier)
    }

    #[test]
    fn test_proceed_without_selection_fails() {
        let (mut attempt, _) = flight_attempt();

        let result = attempt.proceed(true);
        assert_eq!(result, Err(LifecycleError::IncompleteSelection));
        assert_eq!(attempt.state(), LifecycleState::Selecting);
    }

    #[test]
    fn test_happy_path_without_identity() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(2).unwrap();

        assert_eq!(attempt.proceed(false).unwrap(), LifecycleState::AuthRequired);
        attempt.identity_verified().unwrap();
        assert_eq!(attempt.state(), LifecycleState::ReviewingConfirmation);
        attempt.confirm().unwrap();
        assert_eq!(attempt.state(), LifecycleState::AwaitingPayment);

        let breakdown = attempt.payment_succeeded().unwrap();
        assert_eq!(breakdown.total_amount, 11798);
        assert_eq!(attempt.state(), LifecycleState::Completed);
    }

    #[test]
    fn test_proceed_with_identity_skips_auth() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();

        assert_eq!(
            attempt.proceed(true).unwrap(),
            LifecycleState::ReviewingConfirmation
        );
    }

    #[test]
    fn test_reselection_allowed_while_selecting() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.set_quantity(3).unwrap();
        attempt.select_tier(&tier).unwrap();

        assert_eq!(attempt.state(), LifecycleState::Selecting);
        assert_eq!(attempt.quantity(), Some(3));
    }

    #[test]
    fn test_selection_locked_after_leaving_selecting() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.proceed(true).unwrap();
        attempt.confirm().unwrap();

        assert_eq!(
            attempt.set_quantity(5),
            Err(LifecycleError::SelectionLocked)
        );
        assert_eq!(
            attempt.select_tier(&tier),
            Err(LifecycleError::SelectionLocked)
        );
        assert_eq!(attempt.quantity(), Some(1));
        assert_eq!(attempt.tier().unwrap().label, "Economy");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let (mut attempt, _) = flight_attempt();
        assert_eq!(
            attempt.set_quantity(0),
            Err(LifecycleError::Pricing(PricingError::InvalidQuantity(0)))
        );
    }

    #[test]
    fn test_abandon_from_every_non_terminal_state() {
        let (mut attempt, tier) = flight_attempt();
        attempt.abandon().unwrap();
        assert_eq!(attempt.state(), LifecycleState::Abandoned);

        let (mut attempt, _) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.proceed(false).unwrap();
        attempt.abandon().unwrap();
        assert_eq!(attempt.state(), LifecycleState::Abandoned);

        let (mut attempt, _) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.proceed(true).unwrap();
        attempt.confirm().unwrap();
        attempt.abandon().unwrap();
        assert_eq!(attempt.state(), LifecycleState::Abandoned);
    }

    #[test]
    fn test_terminal_states_reject_further_triggers() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();
        attempt.proceed(true).unwrap();
        attempt.confirm().unwrap();
        attempt.payment_succeeded().unwrap();

        assert!(matches!(
            attempt.confirm(),
            Err(LifecycleError::InvalidTransition { .. })
        ));
        assert!(matches!(
            attempt.abandon(),
            Err(LifecycleError::InvalidTransition { .. })
        ));

        let (mut attempt, _) = flight_attempt();
        attempt.abandon().unwrap();
        assert!(matches!(
            attempt.payment_succeeded(),
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_cannot_skip_states() {
        let (mut attempt, tier) = flight_attempt();
        attempt.select_tier(&tier).unwrap();
        attempt.set_quantity(1).unwrap();

        // Selecting -> Completed directly is not a transition
        assert!(matches!(
            attempt.payment_succeeded(),
            Err(LifecycleError::InvalidTransition { .. })
        ));
        assert_eq!(attempt.state(), LifecycleState::Selecting);
    }
}
