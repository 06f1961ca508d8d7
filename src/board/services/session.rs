//! Edit-session state: which task the form is creating or editing, and
//! which task is waiting for delete confirmation.
//!
//! The session is transient. It is never persisted and resets whenever the
//! form closes, whether through commit, cancel or outside dismissal.

use mockable::Clock;
use thiserror::Error;

use super::{BoardStore, BoardStoreError, DeletePolicy};
use crate::board::{
    domain::{BoardDomainError, Stage, Task, TaskDraft, TaskId, TaskRef},
    ports::BoardStorage,
};

/// Mode of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// No form is open.
    #[default]
    Idle,
    /// The form creates a task in the stage.
    Creating(Stage),
    /// The form edits an existing task.
    Editing {
        /// Stage holding the task.
        stage: Stage,
        /// Task being edited.
        id: TaskId,
    },
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// A task was created.
    Created(TaskId),
    /// A task was updated.
    Updated(TaskId),
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The request is parked until [`EditSession::confirm_delete`].
    AwaitingConfirmation,
    /// The task was removed straight away.
    Deleted(Task),
}

/// Errors returned by edit-session transitions.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The transition needs an active form or pending delete.
    #[error("no edit session is active")]
    NotActive,
    /// Form input was rejected; the session keeps its mode.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),
    /// The store rejected the operation.
    #[error(transparent)]
    Store(BoardStoreError),
}

impl From<BoardStoreError> for SessionError {
    fn from(err: BoardStoreError) -> Self {
        match err {
            BoardStoreError::Validation(inner) => Self::Validation(inner),
            other => Self::Store(other),
        }
    }
}

/// Tracks the open form and the pending delete.
///
/// Starting a new form or delete request silently replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    mode: EditMode,
    pending_delete: Option<(Stage, TaskId)>,
}

impl EditSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form mode.
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Returns the task awaiting delete confirmation, if any.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<(Stage, TaskId)> {
        self.pending_delete
    }

    /// Opens the form for a new task in `stage`.
    pub const fn begin_create(&mut self, stage: Stage) {
        self.mode = EditMode::Creating(stage);
    }

    /// Opens the form for an existing task.
    pub const fn begin_edit(&mut self, stage: Stage, id: TaskId) {
        self.mode = EditMode::Editing { stage, id };
    }

    /// Closes the form and drops any pending delete.
    pub const fn close(&mut self) {
        self.mode = EditMode::Idle;
        self.pending_delete = None;
    }

    /// Submits the form.
    ///
    /// Input is checked against the store's configured limits first. On
    /// success the session returns to idle.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotActive`] when no form is open.
    /// - [`SessionError::Validation`] when input is rejected; the form stays
    ///   open.
    /// - [`SessionError::Store`] when the store fails; the form closes since
    ///   the reference is stale or the change was already applied.
    pub fn submit<S, C>(
        &mut self,
        store: &mut BoardStore<S, C>,
        title: &str,
        description: &str,
    ) -> Result<Submitted, SessionError>
    where
        S: BoardStorage,
        C: Clock,
    {
        if self.mode == EditMode::Idle {
            return Err(SessionError::NotActive);
        }
        let draft = TaskDraft::new(title, description)?.check_limits(&store.config().limits)?;

        let result = match self.mode {
            EditMode::Idle => return Err(SessionError::NotActive),
            EditMode::Creating(stage) => store
                .add(stage, draft.title(), draft.description())
                .map(Submitted::Created),
            EditMode::Editing { stage, id } => store
                .update(TaskRef::by_id(stage, id), draft.title(), draft.description())
                .map(|()| Submitted::Updated(id)),
        };

        match result {
            Ok(submitted) => {
                self.mode = EditMode::Idle;
                Ok(submitted)
            }
            Err(BoardStoreError::Validation(err)) => Err(SessionError::Validation(err)),
            Err(err) => {
                self.mode = EditMode::Idle;
                Err(SessionError::Store(err))
            }
        }
    }

    /// Requests deletion of a task, following the store's delete policy.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when an immediate delete fails.
    pub fn request_delete<S, C>(
        &mut self,
        store: &mut BoardStore<S, C>,
        stage: Stage,
        id: TaskId,
    ) -> Result<DeleteRequest, SessionError>
    where
        S: BoardStorage,
        C: Clock,
    {
        match store.config().delete_policy {
            DeletePolicy::Confirm => {
                self.pending_delete = Some((stage, id));
                Ok(DeleteRequest::AwaitingConfirmation)
            }
            DeletePolicy::Immediate => {
                self.pending_delete = None;
                self.delete_now(store, stage, id).map(DeleteRequest::Deleted)
            }
        }
    }

    /// Deletes the task awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotActive`] when nothing is pending, or
    /// [`SessionError::Store`] when the delete fails.
    pub fn confirm_delete<S, C>(
        &mut self,
        store: &mut BoardStore<S, C>,
    ) -> Result<Task, SessionError>
    where
        S: BoardStorage,
        C: Clock,
    {
        let (stage, id) = self.pending_delete.take().ok_or(SessionError::NotActive)?;
        self.delete_now(store, stage, id)
    }

    /// Drops the pending delete without touching the form.
    pub const fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    fn delete_now<S, C>(
        &mut self,
        store: &mut BoardStore<S, C>,
        stage: Stage,
        id: TaskId,
    ) -> Result<Task, SessionError>
    where
        S: BoardStorage,
        C: Clock,
    {
        if matches!(self.mode, EditMode::Editing { id: editing, .. } if editing == id) {
            self.mode = EditMode::Idle;
        }
        Ok(store.delete(TaskRef::by_id(stage, id))?)
    }
}
