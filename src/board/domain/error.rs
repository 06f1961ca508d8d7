//! Error types for board domain validation and parsing.

use super::{Stage, TaskId};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the configured input limit.
    #[error("task title has {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },

    /// The task description exceeds the configured input limit.
    #[error("task description has {actual} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// The maximum allowed number of characters.
        max: usize,
        /// The actual number of characters.
        actual: usize,
    },
}

/// Error returned while parsing stage names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stage: {0}, expected todo, progress or done")]
pub struct ParseStageError(pub String);

/// Errors returned while resolving a task reference against the board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocateError {
    /// The position is out of bounds or was captured before the stage
    /// changed shape.
    #[error("position {index} in stage {stage} is out of range or stale (stage holds {len} tasks)")]
    OutOfRange {
        /// Stage the position refers to.
        stage: Stage,
        /// Index that failed to resolve.
        index: usize,
        /// Current length of the stage.
        len: usize,
    },

    /// No task with the identifier exists in the stage.
    #[error("task {id} not found in stage {stage}")]
    NotFound {
        /// Stage that was searched.
        stage: Stage,
        /// Identifier that was not found.
        id: TaskId,
    },
}
