//! Board aggregate: three ordered stages and the references that address
//! tasks inside them.

use super::{LocateError, Stage, Task, TaskId};
use std::collections::HashSet;

/// Ordered tasks of one stage plus its structural generation.
#[derive(Debug, Clone, Default)]
struct StageList {
    tasks: Vec<Task>,
    generation: u64,
}

impl StageList {
    const fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// The complete collection of tasks across all stages.
///
/// Equality compares tasks only. Generations are transient bookkeeping and
/// are ignored.
#[derive(Debug, Clone, Default)]
pub struct Board {
    todo: StageList,
    progress: StageList,
    done: StageList,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        Stage::ALL
            .iter()
            .all(|stage| self.tasks(*stage) == other.tasks(*stage))
    }
}

impl Eq for Board {}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from already ordered stage contents.
    ///
    /// Callers are expected to check [`Board::find_duplicate`] when the
    /// contents come from an untrusted source.
    #[must_use]
    pub fn from_stages(todo: Vec<Task>, progress: Vec<Task>, done: Vec<Task>) -> Self {
        let list = |tasks| StageList {
            tasks,
            generation: 0,
        };
        Self {
            todo: list(todo),
            progress: list(progress),
            done: list(done),
        }
    }

    const fn list(&self, stage: Stage) -> &StageList {
        match stage {
            Stage::Todo => &self.todo,
            Stage::Progress => &self.progress,
            Stage::Done => &self.done,
        }
    }

    const fn list_mut(&mut self, stage: Stage) -> &mut StageList {
        match stage {
            Stage::Todo => &mut self.todo,
            Stage::Progress => &mut self.progress,
            Stage::Done => &mut self.done,
        }
    }

    /// Returns the tasks of a stage in board order.
    #[must_use]
    pub fn tasks(&self, stage: Stage) -> &[Task] {
        &self.list(stage).tasks
    }

    /// Returns the structural generation of a stage.
    #[must_use]
    pub const fn generation(&self, stage: Stage) -> u64 {
        self.list(stage).generation
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        Stage::ALL.iter().map(|stage| self.tasks(*stage).len()).sum()
    }

    /// Returns `true` when no stage holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }

    /// Returns the first identifier that appears more than once on the board.
    #[must_use]
    pub fn find_duplicate(&self) -> Option<TaskId> {
        let mut seen = HashSet::with_capacity(self.task_count());
        Stage::ALL
            .iter()
            .flat_map(|stage| self.tasks(*stage))
            .map(Task::id)
            .find(|id| !seen.insert(*id))
    }

    /// Returns the stage holding the task with the given identifier.
    #[must_use]
    pub fn stage_of(&self, id: TaskId) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.tasks(*stage).iter().any(|task| task.id() == id))
    }

    /// Captures the current position of the task at `index` in `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::OutOfRange`] when the index is out of bounds.
    pub fn position(&self, stage: Stage, index: usize) -> Result<Position, LocateError> {
        let list = self.list(stage);
        if index >= list.tasks.len() {
            return Err(LocateError::OutOfRange {
                stage,
                index,
                len: list.tasks.len(),
            });
        }
        Ok(Position {
            stage,
            index,
            generation: list.generation,
        })
    }

    /// Resolves a reference to the current index of its task.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::OutOfRange`] for stale or out-of-bounds
    /// positions and [`LocateError::NotFound`] for unknown identifiers.
    pub fn resolve(&self, task_ref: TaskRef) -> Result<usize, LocateError> {
        match task_ref {
            TaskRef::Position(position) => {
                let list = self.list(position.stage);
                let in_bounds = position.index < list.tasks.len();
                if position.generation != list.generation || !in_bounds {
                    return Err(LocateError::OutOfRange {
                        stage: position.stage,
                        index: position.index,
                        len: list.tasks.len(),
                    });
                }
                Ok(position.index)
            }
            TaskRef::Id { stage, id } => self
                .tasks(stage)
                .iter()
                .position(|task| task.id() == id)
                .ok_or(LocateError::NotFound { stage, id }),
        }
    }

    /// Replaces every stage with the contents of `other`.
    ///
    /// Each stage generation moves past both boards' generations, so no
    /// position captured before the replacement resolves afterwards.
    pub fn replace_with(&mut self, mut other: Self) {
        for stage in Stage::ALL {
            let previous = self.generation(stage);
            let list = other.list_mut(stage);
            list.generation = previous.max(list.generation).wrapping_add(1);
        }
        *self = other;
    }

    /// Appends a task to the tail of a stage.
    pub fn push(&mut self, stage: Stage, task: Task) {
        let list = self.list_mut(stage);
        list.tasks.push(task);
        list.touch();
    }

    /// Returns a mutable reference to the task at `index`.
    pub fn get_mut(&mut self, stage: Stage, index: usize) -> Option<&mut Task> {
        self.list_mut(stage).tasks.get_mut(index)
    }

    /// Removes the task at `index`, shifting later tasks down by one.
    pub fn remove(&mut self, stage: Stage, index: usize) -> Option<Task> {
        let list = self.list_mut(stage);
        if index >= list.tasks.len() {
            return None;
        }
        let task = list.tasks.remove(index);
        list.touch();
        Some(task)
    }
}

/// Index of a task captured together with its stage generation.
///
/// A position only resolves while the stage has not been appended to or
/// shortened since the position was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    stage: Stage,
    index: usize,
    generation: u64,
}

impl Position {
    /// Returns the stage.
    #[must_use]
    pub const fn stage(self) -> Stage {
        self.stage
    }

    /// Returns the captured index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// How an operation addresses a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskRef {
    /// A captured position, checked for staleness on use.
    Position(Position),
    /// A stable identifier within a stage.
    Id {
        /// Stage expected to hold the task.
        stage: Stage,
        /// Task identifier.
        id: TaskId,
    },
}

impl TaskRef {
    /// Creates an identifier-based reference.
    #[must_use]
    pub const fn by_id(stage: Stage, id: TaskId) -> Self {
        Self::Id { stage, id }
    }

    /// Returns the stage the reference points into.
    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            Self::Position(position) => position.stage,
            Self::Id { stage, .. } => stage,
        }
    }
}

impl From<Position> for TaskRef {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}
