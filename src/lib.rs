//! Kanbaner: a three-stage task board kept in local key-value storage.
//!
//! Tasks live in one of three ordered stages (`todo`, `progress`, `done`).
//! Every change is validated, applied in memory and written to storage as a
//! versioned JSON blob.
//!
//! # Architecture
//!
//! Kanbaner follows hexagonal architecture principles:
//!
//! - **Domain**: Tasks, stages and the board aggregate
//! - **Ports**: The key-value storage contract
//! - **Adapters**: In-memory and file-backed storage
//!
//! # Modules
//!
//! - [`board`]: Board domain, persistence format, store and edit session

pub mod board;
