use std::collections::HashMap;

use serde_json::json;
use uuid::Uuid;

use crate::product::{Product, ProductType, Tier};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),
}

/// Read-only product lookup. The booking core treats this as a fixed
/// source of price tiers and capacities; there is no live inventory.
pub struct Catalog {
    products: HashMap<(ProductType, Uuid), Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    pub fn insert(&mut self, product: Product) {
        self.products
            .insert((product.product_type, product.id), product);
    }

    pub fn get(&self, product_type: ProductType, id: Uuid) -> Result<&Product, CatalogError> {
        self.products
            .get(&(product_type, id))
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.products.values().find(|p| p.code == code)
    }

    pub fn list(&self, product_type: ProductType) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .values()
            .filter(|p| p.product_type == product_type)
            .collect();
        products.sort_by(|a, b| a.code.cmp(&b.code));
        products
    }

    /// Catalog seeded with the demo inventory.
    pub fn with_sample_data() -> Self {
        let mut catalog = Self::new();

        catalog.insert(Product {
            id: Uuid::new_v4(),
            product_type: ProductType::Flight,
            code: "6E-123".to_string(),
            name: "IndiGo".to_string(),
            tiers: vec![
                tier("Economy", 4999, 120),
                tier("Business", 14999, 12),
            ],
            metadata: json!({
                "origin": "Mumbai",
                "destination": "Delhi",
                "departure_time": "06:00",
                "arrival_time": "08:30",
                "duration": "2h 30m",
                "aircraft": "Airbus A320",
            }),
        });

        catalog.insert(Product {
            id: Uuid::new_v4(),
            product_type: ProductType::Flight,
            code: "AI-456".to_string(),
            name: "Air India".to_string(),
            tiers: vec![
                tier("Economy", 5999, 150),
                tier("Business", 18999, 18),
            ],
            metadata: json!({
                "origin": "Mumbai",
                "destination": "Delhi",
                "departure_time": "08:30",
                "arrival_time": "11:15",
                "duration": "2h 45m",
                "aircraft": "Boeing 787",
            }),
        });

        catalog.insert(Product {
            id: Uuid::new_v4(),
            product_type: ProductType::Hotel,
            code: "GRAND-MUM".to_string(),
            name: "The Grand Luxury Hotel".to_string(),
            tiers: vec![
                tier("Deluxe Room", 12999, 2),
                tier("Executive Suite", 18999, 4),
                tier("Presidential Suite", 25999, 4),
            ],
            metadata: json!({
                "city": "Mumbai",
                "rating": 5,
            }),
        });

        catalog.insert(Product {
            id: Uuid::new_v4(),
            product_type: ProductType::Train,
            code: "12951".to_string(),
            name: "Rajdhani Express".to_string(),
            tiers: vec![
                tier("AC First Class", 4500, 18),
                tier("AC 2 Tier", 2500, 46),
                tier("AC 3 Tier", 1499, 64),
            ],
            metadata: json!({
                "origin": "Mumbai",
                "destination": "Delhi",
            }),
        });

        catalog.insert(Product {
            id: Uuid::new_v4(),
            product_type: ProductType::Train,
            code: "12952".to_string(),
            name: "Rajdhani Express".to_string(),
            tiers: vec![
                tier("AC First Class", 4200, 18),
                tier("AC 2 Tier", 2200, 46),
                tier("AC 3 Tier", 1299, 64),
            ],
            metadata: json!({
                "origin": "Delhi",
                "destination": "Mumbai",
            }),
        });

        catalog
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn tier(label: &str, unit_price: i64, capacity: u32) -> Tier {
    Tier {
        label: label.to_string(),
        unit_price,
        capacity,
    }
}
