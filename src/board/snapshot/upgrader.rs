//! Schema upgrades for persisted boards.
//!
//! Upgrades work on raw JSON so that older layouts never need their own
//! Rust types.
//!
//! # Schema Changes
//!
//! **v1 format** (no version field):
//! ```json
//! { "todo": [{ "title": "...", "description": "...", "createdAt": "..." }], "progress": [], "done": [] }
//! ```
//!
//! **v2 format:**
//! ```json
//! { "version": 2, "todo": [{ "id": "...", "title": "...", "description": "...", "createdAt": "..." }], "progress": [], "done": [] }
//! ```

use chrono::{DateTime, SecondsFormat};
use mockable::Clock;
use serde_json::{Map, Value};

use super::SnapshotError;
use crate::board::domain::{Stage, TaskId};

/// The schema version written by this crate.
pub const CURRENT_VERSION: u32 = 2;

/// Result type for upgrade operations.
pub type UpgradeResult<T> = Result<T, SnapshotError>;

/// Brings raw board JSON up to [`CURRENT_VERSION`].
#[derive(Debug, Default)]
pub struct SnapshotUpgrader;

impl SnapshotUpgrader {
    /// Supported schema versions.
    const SUPPORTED_VERSIONS: &'static [u32] = &[1, 2];

    /// Creates a new upgrader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `true` if the upgrader can handle the given version.
    #[must_use]
    pub fn supports_version(&self, version: u32) -> bool {
        Self::SUPPORTED_VERSIONS.contains(&version)
    }

    /// Reads the schema version of a blob. A missing version means v1.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] when the blob is not an object or
    /// the version is not a small unsigned integer.
    pub fn version_of(value: &Value) -> UpgradeResult<u32> {
        let obj = value
            .as_object()
            .ok_or_else(|| SnapshotError::malformed("expected board blob to be an object"))?;
        match obj.get("version") {
            None => Ok(1),
            Some(raw) => raw
                .as_u64()
                .and_then(|version| u32::try_from(version).ok())
                .ok_or_else(|| SnapshotError::malformed(format!("invalid schema version {raw}"))),
        }
    }

    /// Upgrades a blob to the current version.
    ///
    /// Returns the upgraded value together with the version it started at.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnsupportedVersion`] for unknown versions and
    /// [`SnapshotError::Malformed`] when the blob does not have the expected
    /// shape.
    pub fn upgrade(&self, value: Value, clock: &impl Clock) -> UpgradeResult<(Value, u32)> {
        let version = Self::version_of(&value)?;
        if !self.supports_version(version) {
            return Err(SnapshotError::UnsupportedVersion(version));
        }
        let upgraded = match version {
            1 => Self::upgrade_v1_to_v2(value, clock)?,
            _ => value,
        };
        Ok((upgraded, version))
    }

    /// Assigns identifiers, defaults missing descriptions and stamps missing
    /// or unreadable timestamps with the current instant.
    fn upgrade_v1_to_v2(mut value: Value, clock: &impl Clock) -> UpgradeResult<Value> {
        let now = clock.utc().to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let obj = value
            .as_object_mut()
            .ok_or_else(|| SnapshotError::malformed("expected board blob to be an object"))?;

        for stage in Stage::ALL {
            let tasks = obj
                .entry(stage.as_str())
                .or_insert_with(|| Value::Array(Vec::new()));
            let entries = tasks.as_array_mut().ok_or_else(|| {
                SnapshotError::malformed(format!("stage {stage} must be an array"))
            })?;
            for entry in entries {
                let task = entry.as_object_mut().ok_or_else(|| {
                    SnapshotError::malformed(format!("task in stage {stage} must be an object"))
                })?;
                upgrade_task_v1(task, &now);
            }
        }

        obj.insert("version".to_owned(), Value::from(2));
        Ok(value)
    }
}

fn upgrade_task_v1(task: &mut Map<String, Value>, now: &str) {
    task.insert("id".to_owned(), Value::String(TaskId::new().to_string()));

    let has_description = task.get("description").is_some_and(Value::is_string);
    if !has_description {
        task.insert("description".to_owned(), Value::String(String::new()));
    }

    let has_timestamp = task
        .get("createdAt")
        .and_then(Value::as_str)
        .is_some_and(|raw| DateTime::parse_from_rfc3339(raw).is_ok());
    if !has_timestamp {
        task.insert("createdAt".to_owned(), Value::String(now.to_owned()));
    }
}
