//! The closed set of board stages.

use super::ParseStageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Work that has not started.
    Todo,
    /// Work currently in progress.
    Progress,
    /// Finished work.
    Done,
}

impl Stage {
    /// All stages in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Progress, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for Stage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "progress" => Ok(Self::Progress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
