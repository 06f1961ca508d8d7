//! Wire records for the current schema and the encode/decode entry points.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::{CURRENT_VERSION, SnapshotError, SnapshotUpgrader};
use crate::board::domain::{Board, PersistedTaskData, Stage, Task, TaskDraft, TaskId};

/// One task as stored on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Creation timestamp in RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            created_at: task.created_at(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = SnapshotError;

    /// Rejects records whose title is blank, the same rule new tasks follow.
    /// Stored text is otherwise kept verbatim.
    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        TaskDraft::new(&record.title, &record.description).map_err(|err| {
            SnapshotError::malformed(format!("task {}: {err}", record.id))
        })?;
        Ok(Self::from_persisted(PersistedTaskData {
            id: record.id,
            title: record.title,
            description: record.description,
            created_at: record.created_at,
        }))
    }
}

/// The full persisted board at [`CURRENT_VERSION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Schema version.
    pub version: u32,
    /// Tasks in the `todo` stage.
    pub todo: Vec<TaskRecord>,
    /// Tasks in the `progress` stage.
    pub progress: Vec<TaskRecord>,
    /// Tasks in the `done` stage.
    pub done: Vec<TaskRecord>,
}

impl BoardSnapshot {
    /// Captures a board.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        let records = |stage| board.tasks(stage).iter().map(TaskRecord::from).collect();
        Self {
            version: CURRENT_VERSION,
            todo: records(Stage::Todo),
            progress: records(Stage::Progress),
            done: records(Stage::Done),
        }
    }

    /// Rebuilds the board, rejecting blank titles and duplicated task
    /// identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] when a title is blank and
    /// [`SnapshotError::DuplicateTask`] when an identifier repeats.
    pub fn into_board(self) -> Result<Board, SnapshotError> {
        let tasks = |records: Vec<TaskRecord>| {
            records
                .into_iter()
                .map(Task::try_from)
                .collect::<Result<Vec<_>, _>>()
        };
        let board = Board::from_stages(tasks(self.todo)?, tasks(self.progress)?, tasks(self.done)?);
        match board.find_duplicate() {
            Some(id) => Err(SnapshotError::DuplicateTask(id)),
            None => Ok(board),
        }
    }
}

/// Result of decoding a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The reconstructed board.
    pub board: Board,
    /// The schema version the blob was upgraded from, if an upgrade ran.
    pub upgraded_from: Option<u32>,
}

/// Serializes a board at the current schema version.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialization fails.
pub fn encode(board: &Board) -> Result<String, SnapshotError> {
    serde_json::to_string(&BoardSnapshot::capture(board))
        .map_err(|err| SnapshotError::Encode(err.to_string()))
}

/// Parses a blob of any supported version into a board.
///
/// # Errors
///
/// Returns [`SnapshotError`] when the blob is unparseable, has an unknown
/// version, or repeats a task identifier.
pub fn decode(blob: &str, clock: &impl Clock) -> Result<Decoded, SnapshotError> {
    let raw: serde_json::Value =
        serde_json::from_str(blob).map_err(|err| SnapshotError::malformed(err.to_string()))?;
    let (upgraded, original_version) = SnapshotUpgrader::new().upgrade(raw, clock)?;
    let snapshot: BoardSnapshot = serde_json::from_value(upgraded)
        .map_err(|err| SnapshotError::malformed(err.to_string()))?;
    let board = snapshot.into_board()?;
    Ok(Decoded {
        board,
        upgraded_from: (original_version != CURRENT_VERSION).then_some(original_version),
    })
}
