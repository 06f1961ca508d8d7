//! Step definitions for board store BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
