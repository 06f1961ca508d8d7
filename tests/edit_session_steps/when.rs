//! When steps for edit session BDD scenarios.

use super::world::{EditSessionWorld, stage};
use rstest_bdd_macros::when;

#[when(r#"the form is opened for a new task in "{stage_name}""#)]
fn open_create_form(world: &mut EditSessionWorld, stage_name: String) -> Result<(), eyre::Report> {
    world.session.begin_create(stage(&stage_name)?);
    Ok(())
}

#[when(r#"task {index} of "{stage_name}" is opened for editing"#)]
fn open_edit_form(
    world: &mut EditSessionWorld,
    index: usize,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let target = stage(&stage_name)?;
    let id = world.task_id(target, index)?;
    world.session.begin_edit(target, id);
    Ok(())
}

#[when(r#"the form is submitted with title "{title}""#)]
fn submit_form(world: &mut EditSessionWorld, title: String) {
    let result = world.session.submit(&mut world.store, &title, "");
    world.last_submit = Some(result);
}

#[when(r#"deletion of task {index} in "{stage_name}" is requested"#)]
fn request_delete(
    world: &mut EditSessionWorld,
    index: usize,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let target = stage(&stage_name)?;
    let id = world.task_id(target, index)?;
    let result = world.session.request_delete(&mut world.store, target, id);
    world.last_delete = Some(result);
    Ok(())
}

#[when("the delete is confirmed")]
fn confirm_delete(world: &mut EditSessionWorld) -> Result<(), eyre::Report> {
    world.session.confirm_delete(&mut world.store)?;
    Ok(())
}

#[when("the delete is cancelled")]
fn cancel_delete(world: &mut EditSessionWorld) {
    world.session.cancel_delete();
}
