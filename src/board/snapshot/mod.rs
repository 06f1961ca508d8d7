//! Persisted board format.
//!
//! A board is stored as one JSON object holding a schema version and the
//! three stages. Blobs written before versioning existed carry no version
//! field; they are treated as version 1 and upgraded on decode.

mod error;
mod schema;
mod upgrader;

pub use error::SnapshotError;
pub use schema::{BoardSnapshot, Decoded, TaskRecord, decode, encode};
pub use upgrader::{CURRENT_VERSION, SnapshotUpgrader};
