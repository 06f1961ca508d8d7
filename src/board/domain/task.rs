//! Task entity, validated drafts and input limits.

use super::{BoardDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Character limits applied by the input layer before a draft reaches the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Maximum title length in characters.
    pub title_max_chars: usize,
    /// Maximum description length in characters.
    pub description_max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            title_max_chars: 60,
            description_max_chars: 140,
        }
    }
}

impl InputLimits {
    /// Creates limits that accept any length.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            title_max_chars: usize::MAX,
            description_max_chars: usize::MAX,
        }
    }
}

/// Trimmed, validated title and description for a new or edited task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
}

impl TaskDraft {
    /// Creates a draft from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(title: &str, description: &str) -> Result<Self, BoardDomainError> {
        let trimmed_title = title.trim();
        if trimmed_title.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed_title.to_owned(),
            description: description.trim().to_owned(),
        })
    }

    /// Checks the draft against input-layer character limits.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TitleTooLong`] or
    /// [`BoardDomainError::DescriptionTooLong`] when a field is over its limit.
    pub fn check_limits(self, limits: &InputLimits) -> Result<Self, BoardDomainError> {
        let title_chars = self.title.chars().count();
        if title_chars > limits.title_max_chars {
            return Err(BoardDomainError::TitleTooLong {
                max: limits.title_max_chars,
                actual: title_chars,
            });
        }
        let description_chars = self.description.chars().count();
        if description_chars > limits.description_max_chars {
            return Err(BoardDomainError::DescriptionTooLong {
                max: limits.description_max_chars,
                actual: description_chars,
            });
        }
        Ok(self)
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A single work item on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, possibly empty.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, which may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces title and description. The identifier and creation timestamp
    /// are left untouched.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
    }
}
