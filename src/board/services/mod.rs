//! Application services: the board store and the edit session that drives
//! it.

mod config;
mod session;
mod store;

pub use config::{BoardConfig, DEFAULT_STORAGE_KEY, DeletePolicy};
pub use session::{DeleteRequest, EditMode, EditSession, SessionError, Submitted};
pub use store::{
    BoardStore, BoardStoreError, BoardStoreResult, ErrorKind, LoadError, LoadOutcome, MoveOutcome,
};
