use std::sync::Arc;

use crate::storage::{StorageBackend, StorageError};

const SESSION_KEY: &str = "user";

/// Current user identity, write-through persisted under the `"user"` key.
///
/// Loaded once at session start; every change is saved before the
/// in-memory value moves, so memory and durable state cannot diverge.
pub struct IdentitySession {
    store: Arc<dyn StorageBackend>,
    current: Option<String>,
}

impl IdentitySession {
    pub fn load(store: Arc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let current = match store.load(SESSION_KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => None,
        };
        Ok(Self { store, current })
    }

    pub fn set_identity(&mut self, value: impl Into<String>) -> Result<(), StorageError> {
        let value = value.into();
        let bytes = serde_json::to_vec(&Some(&value))?;
        self.store.save(SESSION_KEY, &bytes)?;
        tracing::info!("Identity set: {}", value);
        self.current = Some(value);
        Ok(())
    }

    pub fn clear_identity(&mut self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&None::<String>)?;
        self.store.save(SESSION_KEY, &bytes)?;
        self.current = None;
        Ok(())
    }

    pub fn current_identity(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
