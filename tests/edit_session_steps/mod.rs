//! Step definitions for edit session BDD scenarios.

mod given;
mod then;
mod when;
