//! In-memory key-value storage for tests and ephemeral boards.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{BoardStorage, StorageError, StorageResult};

/// Thread-safe in-memory storage.
///
/// Clones share the same entries, so two stores built over clones of one
/// storage observe each other's writes (last writer wins).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl InMemoryStorage {
    /// Creates empty, unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty storage that rejects writes once keys and values
    /// together would exceed `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Stores a raw value without quota checks. Useful for seeding legacy or
    /// corrupt blobs.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Poisoned`] when the lock is poisoned.
    pub fn seed(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl BoardStorage for InMemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        if let Some(limit) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(existing, stored)| existing.len() + stored.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
