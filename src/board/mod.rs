//! Task board with three fixed stages.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The persisted format in [`snapshot`]
//! - The store and edit session in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod snapshot;

#[cfg(test)]
mod tests;
