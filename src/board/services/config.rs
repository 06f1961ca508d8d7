//! Board configuration.

use serde::{Deserialize, Serialize};

use crate::board::domain::InputLimits;

/// Key the board blob is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "kanbaner-data";

/// Whether deleting a task needs an explicit confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// A delete request is parked until confirmed.
    #[default]
    Confirm,
    /// A delete request removes the task straight away.
    Immediate,
}

/// Configuration for a [`BoardStore`](super::BoardStore) and the input layer
/// in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Storage key of the board blob.
    pub storage_key: String,
    /// Character limits applied to form input.
    pub limits: InputLimits,
    /// Delete confirmation policy.
    pub delete_policy: DeletePolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            limits: InputLimits::default(),
            delete_policy: DeletePolicy::default(),
        }
    }
}

impl BoardConfig {
    /// Creates a configuration that deletes without confirmation.
    #[must_use]
    pub fn immediate_delete() -> Self {
        Self {
            delete_policy: DeletePolicy::Immediate,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the JSON is invalid.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
