//! Given steps for board store BDD scenarios.

use super::world::{BoardStoreWorld, stage, title_list};
use eyre::WrapErr;
use kanbaner::board::{adapters::InMemoryStorage, services::DEFAULT_STORAGE_KEY};
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty board")]
fn empty_board(world: &mut BoardStoreWorld) {
    *world = BoardStoreWorld::default();
}

#[given(r#"stage "{stage_name}" holds "{titles}""#)]
fn stage_holds(
    world: &mut BoardStoreWorld,
    stage_name: String,
    titles: String,
) -> Result<(), eyre::Report> {
    let target = stage(&stage_name)?;
    for title in title_list(&titles) {
        world
            .store
            .add(target, &title, "")
            .wrap_err_with(|| format!("seed task {title} in {target}"))?;
    }
    Ok(())
}

#[given("a board whose storage holds at most {bytes} bytes")]
fn board_with_quota(world: &mut BoardStoreWorld, bytes: usize) {
    *world = BoardStoreWorld::with_storage(InMemoryStorage::with_quota(bytes));
}

#[given("storage holds a corrupt board")]
fn storage_holds_corrupt_board(world: &mut BoardStoreWorld) -> Result<(), eyre::Report> {
    world
        .storage
        .seed(DEFAULT_STORAGE_KEY, "{not json")
        .wrap_err("seed corrupt board")
}

#[given(r#"storage holds a legacy board with "{title}" in "{stage_name}""#)]
fn storage_holds_legacy_board(
    world: &mut BoardStoreWorld,
    title: String,
    stage_name: String,
) -> Result<(), eyre::Report> {
    let target = stage(&stage_name)?;
    let mut legacy = json!({ "todo": [], "progress": [], "done": [] });
    legacy[target.as_str()] = json!([{
        "title": title,
        "description": "",
        "createdAt": "2024-01-01T08:00:00.000Z",
    }]);
    world
        .storage
        .seed(DEFAULT_STORAGE_KEY, &legacy.to_string())
        .wrap_err("seed legacy board")
}
