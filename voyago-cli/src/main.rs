use std::sync::Arc;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voyago_booking::{
    BookingAttempt, BookingDetails, BookingLedger, CheckoutOrchestrator, LifecycleState,
};
use voyago_catalog::Catalog;
use voyago_core::identity::MockCredentialVerifier;
use voyago_core::payment::{MockPaymentAdapter, PaymentMethod};
use voyago_core::session::IdentitySession;
use voyago_core::storage::StorageBackend;
use voyago_store::JsonFileStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyago_cli=info,voyago_booking=info,voyago_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("VOYAGO_DATA_DIR").unwrap_or_else(|_| "voyago-data".to_string());
    let store: Arc<dyn StorageBackend> =
        Arc::new(JsonFileStore::new(&data_dir).expect("Failed to open data directory"));
    tracing::info!("Durable state in {}", data_dir);

    let catalog = Catalog::with_sample_data();
    let mut session = IdentitySession::load(store.clone()).expect("Failed to load session");
    let mut ledger = BookingLedger::load(store).expect("Failed to load ledger");
    let orchestrator = CheckoutOrchestrator::new(
        Arc::new(MockCredentialVerifier),
        Arc::new(MockPaymentAdapter::new()),
    );

    // Scripted walk through one flight booking
    let flight = catalog.find_by_code("6E-123").expect("Seed data missing");
    let economy = flight.tier("Economy").expect("Seed data missing");
    tracing::info!(
        "Booking {} {} ({} per passenger)",
        flight.name,
        flight.code,
        economy.unit_price
    );

    let mut attempt = BookingAttempt::new(flight);
    attempt.select_tier(economy).expect("Selection is open");
    attempt.set_quantity(2).expect("Selection is open");

    let quote = attempt.quote().expect("Selection is complete");
    tracing::info!(
        "Quote: base {} + tax {} = {}",
        quote.base_amount,
        quote.tax_amount,
        quote.total_amount
    );

    let next = attempt
        .proceed(session.current_identity().is_some())
        .expect("Selection is complete");
    if next == LifecycleState::AuthRequired {
        orchestrator
            .login(&mut attempt, &mut session, "demo@voyago.dev", "letmein")
            .await
            .expect("Login step failed");
    }

    attempt.confirm().expect("Review step");
    let details = BookingDetails::Flight {
        origin: "Mumbai".to_string(),
        destination: "Delhi".to_string(),
        travel_date: NaiveDate::from_ymd_opt(2026, 9, 14).expect("Valid date"),
        passengers: 2,
        cabin_class: economy.label.clone(),
    };
    let method = PaymentMethod::Upi {
        vpa: "demo@upi".to_string(),
    };
    let record = orchestrator
        .complete_payment(&mut attempt, &mut ledger, &session, details, &method)
        .await
        .expect("Payment step failed")
        .expect("Mock gateway always accepts");
    tracing::info!("Booked: {} for {}", record.id, record.price);

    tracing::info!("Ledger now holds {} booking(s):", ledger.records().len());
    for booking in ledger.filter_by_type(None) {
        tracing::info!(
            "  {} {:?} {:?} total {} ({})",
            booking.id,
            booking.product_type(),
            booking.status,
            booking.price,
            booking.created_at.to_rfc3339()
        );
    }
}
