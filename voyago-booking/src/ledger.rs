use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use voyago_catalog::ProductType;
use voyago_core::storage::{StorageBackend, StorageError};

use crate::models::{BookingRecord, BookingStatus, NewBooking};

const LEDGER_KEY: &str = "bookings";

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Durable collection of all completed and cancelled bookings for the
/// current identity, in insertion (chronological) order.
///
/// Loaded whole at session start; the in-memory copy is the read source
/// of truth. Every mutation persists the full collection before it
/// commits, and a failed write leaves memory exactly as it was, so the
/// two copies cannot diverge.
pub struct BookingLedger {
    store: Arc<dyn StorageBackend>,
    records: Vec<BookingRecord>,
}

impl BookingLedger {
    pub fn load(store: Arc<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let records = match store.load(LEDGER_KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(StorageError::from)?,
            None => Vec::new(),
        };
        Ok(Self { store, records })
    }

    /// Append a completed booking. Assigns the id and timestamp, persists,
    /// and returns the stored record.
    pub fn append(&mut self, booking: NewBooking) -> Result<BookingRecord, LedgerError> {
        let record = BookingRecord {
            id: Uuid::new_v4(),
            user_email: booking.user_email,
            status: booking.status,
            details: booking.details,
            price: booking.price,
            created_at: Utc::now(),
        };

        self.records.push(record.clone());
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }

        tracing::info!(
            "Booking {} recorded for {} ({:?}, total {})",
            record.id,
            record.user_email,
            record.product_type(),
            record.price
        );
        Ok(record)
    }

    /// Flip a booking to `Cancelled`. Cancelling an already-cancelled
    /// booking is a silent no-op, so a repeated cancel cannot corrupt
    /// state. The record itself is never removed.
    pub fn cancel(&mut self, id: Uuid) -> Result<(), LedgerError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(LedgerError::NotFound(id))?;

        if self.records[index].status == BookingStatus::Cancelled {
            return Ok(());
        }

        let previous = self.records[index].status.clone();
        self.records[index].status = BookingStatus::Cancelled;
        if let Err(err) = self.persist() {
            self.records[index].status = previous;
            return Err(err);
        }

        tracing::info!("Booking {} cancelled", id);
        Ok(())
    }

    /// All records of the given type, or every record when `None`, in
    /// insertion order.
    pub fn filter_by_type(&self, product_type: Option<ProductType>) -> Vec<&BookingRecord> {
        self.records
            .iter()
            .filter(|r| product_type.map_or(true, |t| r.product_type() == t))
            .collect()
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(&self.records).map_err(StorageError::from)?;
        self.store.save(LEDGER_KEY, &bytes)?;
        Ok(())
    }
}
