use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use voyago_core::storage::{StorageBackend, StorageError};

/// File-per-key storage backend: each key lives in `<dir>/<key>.json` and
/// every save rewrites the whole document. The booking engine keeps its
/// durable state small (one ledger, one session), so whole-document
/// writes are the simplest way to honor the all-or-nothing contract.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Unavailable(err.to_string())),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        fs::write(&path, bytes).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        tracing::debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
