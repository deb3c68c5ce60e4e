use serde::{Deserialize, Serialize};
use voyago_catalog::ProductType;

/// Amounts in the smallest currency unit. Derived from a tier and a
/// quantity, never stored apart from the booking it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_amount: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PricingError {
    #[error("Quantity must be a positive integer, got {0}")]
    InvalidQuantity(u32),

    #[error("Unit price cannot be negative, got {0}")]
    InvalidPrice(i64),
}

/// Tax rate applied at checkout, per product category. Flights carry the
/// 18% levy; hotel and train fares are quoted gross.
pub fn tax_rate_percent(product_type: ProductType) -> f64 {
    match product_type {
        ProductType::Flight => 18.0,
        ProductType::Hotel | ProductType::Train => 0.0,
    }
}

/// Compute base, tax and total for a tier price and quantity.
///
/// Pure and deterministic: the same inputs always produce the same
/// breakdown, so a price summary can be redisplayed without re-deriving
/// any state. Evaluated exactly once per booking at the moment payment
/// succeeds; the charged total is this `total_amount`.
pub fn compute_breakdown(
    unit_price: i64,
    quantity: u32,
    tax_rate_percent: f64,
) -> Result<PriceBreakdown, PricingError> {
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    if unit_price < 0 {
        return Err(PricingError::InvalidPrice(unit_price));
    }

    let base_amount = unit_price * i64::from(quantity);
    let tax_amount = if tax_rate_percent == 0.0 {
        0
    } else {
        round_half_up(base_amount as f64 * tax_rate_percent / 100.0)
    };

    Ok(PriceBreakdown {
        base_amount,
        tax_amount,
        total_amount: base_amount + tax_amount,
    })
}

// Round to the nearest currency unit, halves up.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_is_exact() {
        let breakdown = compute_breakdown(1499, 3, 0.0).unwrap();
        assert_eq!(breakdown.base_amount, 4497);
        assert_eq!(breakdown.tax_amount, 0);
        assert_eq!(breakdown.total_amount, 4497);
    }

    #[test]
    fn test_flight_tax_single_passenger() {
        // 4999 * 0.18 = 899.82 -> 900
        let breakdown = compute_breakdown(4999, 1, 18.0).unwrap();
        assert_eq!(breakdown.base_amount, 4999);
        assert_eq!(breakdown.tax_amount, 900);
        assert_eq!(breakdown.total_amount, 5899);
    }

    #[test]
    fn test_flight_tax_two_passengers() {
        // 9998 * 0.18 = 1799.64 -> 1800
        let breakdown = compute_breakdown(4999, 2, 18.0).unwrap();
        assert_eq!(breakdown.base_amount, 9998);
        assert_eq!(breakdown.tax_amount, 1800);
        assert_eq!(breakdown.total_amount, 11798);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert_eq!(
            compute_breakdown(4999, 0, 18.0),
            Err(PricingError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_eq!(
            compute_breakdown(-1, 1, 18.0),
            Err(PricingError::InvalidPrice(-1))
        );
    }

    #[test]
    fn test_tax_rates_by_product_type() {
        assert_eq!(tax_rate_percent(ProductType::Flight), 18.0);
        assert_eq!(tax_rate_percent(ProductType::Hotel), 0.0);
        assert_eq!(tax_rate_percent(ProductType::Train), 0.0);
    }
}
