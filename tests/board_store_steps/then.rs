//! Then steps for board store BDD scenarios.

use super::world::{BoardStoreWorld, stage, title_list};
use kanbaner::board::{
    ports::BoardStorage,
    services::{DEFAULT_STORAGE_KEY, ErrorKind, LoadOutcome},
};
use rstest_bdd_macros::then;

#[then(r#"stage "{stage_name}" lists "{titles}""#)]
fn stage_lists(
    world: &BoardStoreWorld,
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
fn stage_is_empty(world: &BoardStoreWorld, stage_name: String) -> Result<(), eyre::Report> {
    let tasks = world.store.tasks(stage(&stage_name)?);
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", tasks.len()));
    }
    Ok(())
}

fn expect_kind(world: &BoardStoreWorld, expected: ErrorKind) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected {expected:?} error, operation succeeded"))?;
    if err.kind() != expected {
        return Err(eyre::eyre!("expected {expected:?} error, got {err:?}"));
    }
    Ok(())
}

#[then("the last operation fails with a validation error")]
fn fails_with_validation(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    expect_kind(world, ErrorKind::Validation)
}

#[then("the last operation fails with an out of range error")]
fn fails_with_out_of_range(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    expect_kind(world, ErrorKind::OutOfRange)
}

#[then("the last operation fails with a persistence error")]
fn fails_with_persistence(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    expect_kind(world, ErrorKind::Persistence)
}

#[then("the store is dirty")]
fn store_is_dirty(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    if !world.store.is_dirty() {
        return Err(eyre::eyre!("expected the store to be dirty"));
    }
    Ok(())
}

#[then("the stored board matches the in-memory board")]
fn stored_matches_memory(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    let stored = world
        .storage
        .read(DEFAULT_STORAGE_KEY)?
        .ok_or_else(|| eyre::eyre!("nothing stored under {DEFAULT_STORAGE_KEY}"))?;
    let expected = world.store.serialize()?;
    if stored != expected {
        return Err(eyre::eyre!("stored blob {stored} differs from {expected}"));
    }
    Ok(())
}

#[then("loading fails with a persistence error")]
fn loading_fails(world: &BoardStoreWorld) -> Result<(), eyre::Report> {
    match &world.last_load {
        Some(Err(err)) if err.kind() == ErrorKind::Persistence => Ok(()),
        other => Err(eyre::eyre!("expected a persistence error on load, got {other:?}")),
    }
}

#[then("the load reports an upgrade from version {version}")]
fn load_reports_upgrade(world: &BoardStoreWorld, version: u32) -> Result<(), eyre::Report> {
    match &world.last_load {
        Some(Ok(LoadOutcome::Restored {
            upgraded_from: Some(from),
            ..
        })) if *from == version => Ok(()),
        other => Err(eyre::eyre!("expected upgrade from {version}, got {other:?}")),
    }
}
