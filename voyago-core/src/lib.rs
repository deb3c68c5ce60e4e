pub mod identity;
pub mod payment;
pub mod session;
pub mod storage;

pub use identity::{AuthError, CredentialVerifier, MockCredentialVerifier};
pub use payment::{MockPaymentAdapter, PaymentAdapter, PaymentError, PaymentMethod};
pub use session::IdentitySession;
pub use storage::{MemoryStore, StorageBackend, StorageError};
