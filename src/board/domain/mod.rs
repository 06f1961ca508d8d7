//! Domain model for the task board.
//!
//! The board domain holds stages, tasks and the references used to address
//! them, while keeping persistence and presentation outside of the domain
//! boundary.

mod board;
mod error;
mod ids;
mod stage;
mod task;

pub use board::{Board, Position, TaskRef};
pub use error::{BoardDomainError, LocateError, ParseStageError};
pub use ids::TaskId;
pub use stage::Stage;
pub use task::{InputLimits, PersistedTaskData, Task, TaskDraft};
