//! Then steps for edit session BDD scenarios.

use super::world::{EditSessionWorld, stage, title_list};
use kanbaner::board::services::{DeleteRequest, EditMode, SessionError};
use rstest_bdd_macros::then;

#[then(r#"stage "{stage_name}" lists "{titles}""#)]
fn stage_lists(
    world: &EditSessionWorld,
    stage_name: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .store
        .tasks(stage(&stage_name)?)
        .iter()
        .map(|task| task.title().to_owned())
        .collect();
    let expected = title_list(&titles);
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"stage "{stage_name}" is empty"#)]
fn stage_is_empty(world: &EditSessionWorld, stage_name: String) -> Result<(), eyre::Report> {
    let tasks = world.store.tasks(stage(&stage_name)?);
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", tasks.len()));
    }
    Ok(())
}

#[then("the session is idle")]
fn session_is_idle(world: &EditSessionWorld) -> Result<(), eyre::Report> {
    if world.session.mode() != EditMode::Idle {
        return Err(eyre::eyre!("expected idle, found {:?}", world.session.mode()));
    }
    Ok(())
}

#[then(r#"the session is still creating in "{stage_name}""#)]
fn session_still_creating(
    world: &EditSessionWorld,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let expected = EditMode::Creating(stage(&stage_name)?);
    if world.session.mode() != expected {
        return Err(eyre::eyre!(
            "expected {expected:?}, found {:?}",
            world.session.mode()
        ));
    }
    Ok(())
}

#[then("the submission fails with a validation error")]
fn submission_fails_validation(world: &EditSessionWorld) -> Result<(), eyre::Report> {
    match &world.last_submit {
        Some(Err(SessionError::Validation(_))) => Ok(()),
        other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}

#[then("the delete awaits confirmation")]
fn delete_awaits_confirmation(world: &EditSessionWorld) -> Result<(), eyre::Report> {
    let parked = world.session.pending_delete().is_some();
    match &world.last_delete {
        Some(Ok(DeleteRequest::AwaitingConfirmation)) if parked => Ok(()),
        other => Err(eyre::eyre!("expected a parked delete, got {other:?}")),
    }
}

#[then("nothing awaits confirmation")]
fn nothing_awaits_confirmation(world: &EditSessionWorld) -> Result<(), eyre::Report> {
    if let Some(pending) = world.session.pending_delete() {
        return Err(eyre::eyre!("unexpected pending delete {pending:?}"));
    }
    Ok(())
}
