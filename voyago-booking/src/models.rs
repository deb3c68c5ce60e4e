use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voyago_catalog::ProductType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// Type-specific booking details, one closed variant per product
/// category rather than a single struct of optional fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingDetails {
    Flight {
        origin: String,
        destination: String,
        travel_date: NaiveDate,
        passengers: u32,
        cabin_class: String,
    },
    Hotel {
        hotel_name: String,
        room_type: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
        nights: u32,
    },
    Train {
        origin: String,
        destination: String,
        travel_date: NaiveDate,
        passengers: u32,
        train_number: String,
        train_class: String,
    },
}

impl BookingDetails {
    pub fn product_type(&self) -> ProductType {
        match self {
            BookingDetails::Flight { .. } => ProductType::Flight,
            BookingDetails::Hotel { .. } => ProductType::Hotel,
            BookingDetails::Train { .. } => ProductType::Train,
        }
    }
}

/// Durable record of a completed booking. The id and price are immutable
/// once assigned; only the status ever changes, and never out of
/// `Cancelled`. Records are flagged, not deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub user_email: String,
    pub status: BookingStatus,
    pub details: BookingDetails,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn product_type(&self) -> ProductType {
        self.details.product_type()
    }
}

/// Input for appending to the ledger; id and timestamp are assigned at
/// insertion.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_email: String,
    pub status: BookingStatus,
    pub details: BookingDetails,
    pub price: i64,
}
