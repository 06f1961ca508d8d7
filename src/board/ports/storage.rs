//! Storage port: a synchronous key-value backend holding serialized boards.

use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value persistence contract.
///
/// Reads and writes are blocking and complete before returning. The last
/// write to a key wins; implementations do not merge.
pub trait BoardStorage {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been stored under the key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the value does not fit,
    /// or another [`StorageError`] when the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Errors returned by storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The backend has no room for the value.
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded {
        /// Bytes the backend would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        limit: usize,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Shared state was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
