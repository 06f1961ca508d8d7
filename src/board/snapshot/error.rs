//! Errors raised while encoding or decoding persisted boards.

use crate::board::domain::TaskId;
use thiserror::Error;

/// Errors that can occur while converting between boards and blobs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The blob is not valid JSON or does not match the schema.
    #[error("malformed board blob: {0}")]
    Malformed(String),

    /// The blob was written by a newer or unknown schema.
    #[error("unsupported board schema version {0}")]
    UnsupportedVersion(u32),

    /// The same task identifier appears more than once.
    #[error("task {0} appears more than once in the stored board")]
    DuplicateTask(TaskId),

    /// The board could not be serialized.
    #[error("failed to encode board: {0}")]
    Encode(String),
}

impl SnapshotError {
    /// Creates a malformed-blob error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }
}
