//! Given steps for edit session BDD scenarios.

use super::world::{EditSessionWorld, stage};
use kanbaner::board::services::BoardConfig;
use rstest_bdd_macros::given;

#[given("an idle session over an empty board")]
fn idle_session_over_empty_board(world: &mut EditSessionWorld) {
    *world = EditSessionWorld::default();
}

#[given(r#"an idle session over a board with "{titles}" in "{stage_name}""#)]
fn idle_session_over_board(
    world: &mut EditSessionWorld,
    titles: String,
    stage_name: String,
) -> Result<(), eyre::Report> {
    *world = EditSessionWorld::default();
    world.seed(stage(&stage_name)?, &titles)
}

#[given(
    r#"an idle session with immediate deletes over a board with "{titles}" in "{stage_name}""#
)]
fn immediate_session_over_board(
    world: &mut EditSessionWorld,
    titles: String,
    stage_name: String,
) -> Result<(), eyre::Report> {
    *world = EditSessionWorld::with_config(BoardConfig::immediate_delete());
    world.seed(stage(&stage_name)?, &titles)
}
