pub mod checkout;
pub mod ledger;
pub mod lifecycle;
pub mod models;
pub mod pricing;

pub use checkout::{CheckoutError, CheckoutOrchestrator};
pub use ledger::{BookingLedger, LedgerError};
pub use lifecycle::{BookingAttempt, LifecycleError, LifecycleState, TierSelection};
pub use models::{BookingDetails, BookingRecord, BookingStatus, NewBooking};
pub use pricing::{compute_breakdown, tax_rate_percent, PriceBreakdown, PricingError};
