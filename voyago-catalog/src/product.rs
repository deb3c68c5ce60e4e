use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product categories offered by the booking engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Flight,
    Hotel,
    Train,
}

/// A purchasable variant of a product: cabin class, room type or train
/// class, with its own per-unit price (smallest currency unit) and
/// capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub label: String,
    pub unit_price: i64,
    pub capacity: u32,
}

/// Catalog entry. Immutable for the duration of a booking attempt;
/// schedule and location specifics ride along as metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub product_type: ProductType,
    pub code: String,
    pub name: String,
    pub tiers: Vec<Tier>,
    pub metadata: serde_json::Value,
}

impl Product {
    pub fn tier(&self, label: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.label == label)
    }
}
