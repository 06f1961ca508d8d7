//! When steps for board store BDD scenarios.

use super::world::{BoardStoreWorld, stage};
use rstest_bdd_macros::when;

#[when(r#"a task titled "{title}" is added to "{stage_name}""#)]
fn add_task(
    world: &mut BoardStoreWorld,
    title: String,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let target = stage(&stage_name)?;
    let result = world.store.add(target, &title, "");
    world.record(result);
    Ok(())
}

#[when(r#"task {index} of "{from}" is moved to "{to}""#)]
fn move_task(
    world: &mut BoardStoreWorld,
    index: usize,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let position = world.store.position(stage(&from)?, index)?;
    let result = world.store.move_task(position, stage(&to)?);
    world.record(result);
    Ok(())
}

#[when(r#"task {index} of "{stage_name}" is deleted"#)]
fn delete_task(
    world: &mut BoardStoreWorld,
    index: usize,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let position = world.store.position(stage(&stage_name)?, index)?;
    let result = world.store.delete(position);
    world.record(result);
    Ok(())
}

#[when(r#"the position of task {index} in "{stage_name}" is captured"#)]
fn capture_position(
    world: &mut BoardStoreWorld,
    index: usize,
    stage_name: String,
) -> Result<(), eyre::Report> {
    world.captured = Some(world.store.position(stage(&stage_name)?, index)?);
    Ok(())
}

#[when("the captured task is deleted")]
fn delete_captured(world: &mut BoardStoreWorld) -> Result<(), eyre::Report> {
    let position = world
        .captured
        .ok_or_else(|| eyre::eyre!("no position captured in scenario world"))?;
    let result = world.store.delete(position);
    world.record(result);
    Ok(())
}

#[when("the board is loaded from storage")]
fn load_board(world: &mut BoardStoreWorld) {
    world.last_load = Some(world.store.load());
}
