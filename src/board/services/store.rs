//! The board store: sole owner of the board and the only path to storage.

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::BoardConfig;
use crate::board::{
    domain::{
        Board, BoardDomainError, LocateError, Position, Stage, Task, TaskDraft, TaskId, TaskRef,
    },
    ports::{BoardStorage, StorageError},
    snapshot::{self, SnapshotError},
};

/// Coarse classification of store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was rejected; nothing changed.
    Validation,
    /// A stale or unknown task reference; the single operation was aborted.
    OutOfRange,
    /// Storage could not be read or written.
    Persistence,
}

/// Why [`BoardStore::load`] fell back to an empty board.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The backend could not be read.
    #[error("failed to read stored board: {0}")]
    Storage(#[from] StorageError),
    /// The stored blob could not be decoded.
    #[error("stored board is unreadable: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Errors returned by board store operations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// Input validation failed; the board is unchanged.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// A position was out of bounds or captured before the stage changed.
    #[error(
        "position {index} in stage {stage} is out of range or stale (stage holds {len} tasks)"
    )]
    OutOfRange {
        /// Stage the position refers to.
        stage: Stage,
        /// Index that failed to resolve.
        index: usize,
        /// Current length of the stage.
        len: usize,
    },

    /// The task is not in the expected stage.
    #[error("task {id} not found in stage {stage}")]
    NotFound {
        /// Stage that was searched.
        stage: Stage,
        /// Identifier that was not found.
        id: TaskId,
    },

    /// The in-memory change stands but was not written to storage.
    #[error("change applied but not persisted: {0}")]
    NotPersisted(StorageError),

    /// The stored board could not be loaded; the store now holds an empty
    /// board.
    #[error("loaded an empty board instead: {0}")]
    Load(#[from] LoadError),

    /// A blob could not be encoded or decoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl BoardStoreError {
    /// Returns the coarse kind of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::OutOfRange { .. } | Self::NotFound { .. } => ErrorKind::OutOfRange,
            Self::NotPersisted(_) | Self::Load(_) | Self::Snapshot(_) => ErrorKind::Persistence,
        }
    }
}

impl From<LocateError> for BoardStoreError {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::OutOfRange { stage, index, len } => Self::OutOfRange { stage, index, len },
            LocateError::NotFound { stage, id } => Self::NotFound { stage, id },
        }
    }
}

/// Result type for board store operations.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// What [`BoardStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; the board is empty.
    Empty,
    /// A stored board was restored.
    Restored {
        /// Number of tasks restored.
        tasks: usize,
        /// Schema version the blob was upgraded from, if any.
        upgraded_from: Option<u32>,
        /// `false` when the upgraded board could not be written back. The
        /// store is then dirty and [`BoardStore::flush`] retries the write.
        persisted: bool,
    },
}

/// What [`BoardStore::move_task`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Source and target stage were the same; nothing happened.
    SameStage,
    /// The task was appended to the target stage.
    Moved(TaskId),
}

/// Owner of a board and its persistence.
///
/// Every mutation is written to storage before it returns. When the write
/// fails the mutation is kept in memory, the store is marked dirty and the
/// caller receives [`BoardStoreError::NotPersisted`].
#[derive(Debug)]
pub struct BoardStore<S, C>
where
    S: BoardStorage,
    C: Clock,
{
    storage: S,
    clock: C,
    config: BoardConfig,
    board: Board,
    dirty: bool,
}

impl<S, C> BoardStore<S, C>
where
    S: BoardStorage,
    C: Clock,
{
    /// Creates a store holding an empty board. Call [`Self::load`] to hydrate
    /// it from storage.
    #[must_use]
    pub fn new(storage: S, clock: C, config: BoardConfig) -> Self {
        Self {
            storage,
            clock,
            config,
            board: Board::new(),
            dirty: false,
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the clock used to stamp new tasks.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the tasks of a stage in board order.
    #[must_use]
    pub fn tasks(&self, stage: Stage) -> &[Task] {
        self.board.tasks(stage)
    }

    /// Returns `true` when the last write to storage failed.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Captures the position of the task at `index` in `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::OutOfRange`] when the index is out of bounds.
    pub fn position(&self, stage: Stage, index: usize) -> BoardStoreResult<Position> {
        Ok(self.board.position(stage, index)?)
    }

    /// Hydrates the board from storage.
    ///
    /// A board written by an older schema is upgraded and written back. If
    /// that write fails the load still succeeds, the store is marked dirty
    /// and the outcome reports `persisted: false`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Load`] when storage cannot be read or the
    /// blob cannot be decoded. The store then holds an empty board and stays
    /// usable.
    pub fn load(&mut self) -> BoardStoreResult<LoadOutcome> {
        match self.read_stored() {
            Ok(None) => {
                self.board.replace_with(Board::new());
                debug!(key = %self.config.storage_key, "no stored board, starting empty");
                Ok(LoadOutcome::Empty)
            }
            Ok(Some(decoded)) => {
                self.board.replace_with(decoded.board);
                let tasks = self.board.task_count();
                let mut persisted = true;
                if let Some(version) = decoded.upgraded_from {
                    info!(from = version, to = snapshot::CURRENT_VERSION, "upgraded stored board");
                    if let Err(err) = self.persist() {
                        warn!(error = %err, "failed to write back upgraded board");
                        persisted = false;
                    }
                }
                debug!(tasks, persisted, "restored board");
                Ok(LoadOutcome::Restored {
                    tasks,
                    upgraded_from: decoded.upgraded_from,
                    persisted,
                })
            }
            Err(err) => {
                self.board.replace_with(Board::new());
                warn!(error = %err, "stored board unusable, starting empty");
                Err(BoardStoreError::Load(err))
            }
        }
    }

    fn read_stored(&self) -> Result<Option<snapshot::Decoded>, LoadError> {
        let Some(blob) = self.storage.read(&self.config.storage_key)? else {
            return Ok(None);
        };
        Ok(Some(snapshot::decode(&blob, &self.clock)?))
    }

    /// Appends a new task to the tail of `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Validation`] without touching the board when
    /// the title is empty after trimming, or
    /// [`BoardStoreError::NotPersisted`] when the write fails.
    pub fn add(
        &mut self,
        stage: Stage,
        title: &str,
        description: &str,
    ) -> BoardStoreResult<TaskId> {
        let draft = TaskDraft::new(title, description)?;
        let task = Task::new(draft, &self.clock);
        let id = task.id();
        self.board.push(stage, task);
        debug!(stage = %stage, task_id = %id, "task added");
        self.persist()?;
        Ok(id)
    }

    /// Replaces title and description of a task. The creation timestamp is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Validation`] for an empty title,
    /// [`BoardStoreError::OutOfRange`] or [`BoardStoreError::NotFound`] when
    /// the reference no longer resolves, or
    /// [`BoardStoreError::NotPersisted`] when the write fails.
    pub fn update(
        &mut self,
        task_ref: impl Into<TaskRef>,
        title: &str,
        description: &str,
    ) -> BoardStoreResult<()> {
        let target = task_ref.into();
        let draft = TaskDraft::new(title, description)?;
        let stage = target.stage();
        let index = self.board.resolve(target)?;
        let len = self.board.tasks(stage).len();
        let task = self
            .board
            .get_mut(stage, index)
            .ok_or(BoardStoreError::OutOfRange { stage, index, len })?;
        task.apply(draft);
        debug!(stage = %stage, task_id = %task.id(), "task updated");
        self.persist()
    }

    /// Removes a task, shifting later tasks of its stage down by one.
    ///
    /// Positions captured in the same stage before the call no longer
    /// resolve afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::OutOfRange`] or
    /// [`BoardStoreError::NotFound`] when the reference no longer resolves,
    /// or [`BoardStoreError::NotPersisted`] when the write fails.
    pub fn delete(&mut self, task_ref: impl Into<TaskRef>) -> BoardStoreResult<Task> {
        let target = task_ref.into();
        let stage = target.stage();
        let task = self.take(target)?;
        debug!(stage = %stage, task_id = %task.id(), "task deleted");
        self.persist()?;
        Ok(task)
    }

    /// Moves a task to the tail of another stage.
    ///
    /// Moving within the same stage is a no-op: the reference is not even
    /// resolved and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::OutOfRange`] or
    /// [`BoardStoreError::NotFound`] when the reference no longer resolves,
    /// or [`BoardStoreError::NotPersisted`] when the write fails.
    pub fn move_task(
        &mut self,
        task_ref: impl Into<TaskRef>,
        to: Stage,
    ) -> BoardStoreResult<MoveOutcome> {
        let target = task_ref.into();
        let from = target.stage();
        if from == to {
            return Ok(MoveOutcome::SameStage);
        }
        let task = self.take(target)?;
        let id = task.id();
        self.board.push(to, task);
        debug!(from = %from, to = %to, task_id = %id, "task moved");
        self.persist()?;
        Ok(MoveOutcome::Moved(id))
    }

    fn take(&mut self, target: TaskRef) -> BoardStoreResult<Task> {
        let stage = target.stage();
        let index = self.board.resolve(target)?;
        let len = self.board.tasks(stage).len();
        self.board
            .remove(stage, index)
            .ok_or(BoardStoreError::OutOfRange { stage, index, len })
    }

    /// Produces the persisted representation of the whole board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Snapshot`] if encoding fails.
    pub fn serialize(&self) -> BoardStoreResult<String> {
        Ok(snapshot::encode(&self.board)?)
    }

    /// Replaces the board wholesale from a blob, upgrading older schemas.
    /// Nothing is written to storage.
    ///
    /// Returns the schema version the blob was upgraded from, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Snapshot`] and leaves the board untouched
    /// when the blob cannot be decoded.
    pub fn deserialize(&mut self, blob: &str) -> BoardStoreResult<Option<u32>> {
        let decoded = snapshot::decode(blob, &self.clock)?;
        self.board.replace_with(decoded.board);
        Ok(decoded.upgraded_from)
    }

    /// Writes the current board to storage, clearing the dirty flag on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::NotPersisted`] when the write fails.
    pub fn flush(&mut self) -> BoardStoreResult<()> {
        self.persist()
    }

    fn persist(&mut self) -> BoardStoreResult<()> {
        let blob = match snapshot::encode(&self.board) {
            Ok(blob) => blob,
            Err(err) => {
                self.dirty = true;
                return Err(err.into());
            }
        };
        match self.storage.write(&self.config.storage_key, &blob) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                warn!(error = %err, key = %self.config.storage_key, "board change not persisted");
                Err(BoardStoreError::NotPersisted(err))
            }
        }
    }
}
