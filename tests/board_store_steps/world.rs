//! Shared world state for board store BDD scenarios.

use kanbaner::board::{
    adapters::InMemoryStorage,
    domain::{Position, Stage},
    services::{BoardConfig, BoardStore, BoardStoreError, LoadOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestBoardStore = BoardStore<InMemoryStorage, DefaultClock>;

/// Scenario world for board store behaviour tests.
pub struct BoardStoreWorld {
    pub storage: InMemoryStorage,
    pub store: TestBoardStore,
    pub captured: Option<Position>,
    pub last_error: Option<BoardStoreError>,
    pub last_load: Option<Result<LoadOutcome, BoardStoreError>>,
}

impl BoardStoreWorld {
    /// Creates a world over the given storage.
    #[must_use]
    pub fn with_storage(storage: InMemoryStorage) -> Self {
        let store = BoardStore::new(storage.clone(), DefaultClock, BoardConfig::default());
        Self {
            storage,
            store,
            captured: None,
            last_error: None,
            last_load: None,
        }
    }

    /// Records the error of a fallible store call, if any.
    pub fn record<T>(&mut self, result: Result<T, BoardStoreError>) {
        self.last_error = result.err();
    }
}

impl Default for BoardStoreWorld {
    fn default() -> Self {
        Self::with_storage(InMemoryStorage::new())
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardStoreWorld {
    BoardStoreWorld::default()
}

/// Parses a stage name written in a scenario.
pub fn stage(name: &str) -> Result<Stage, eyre::Report> {
    Stage::try_from(name).map_err(|err| eyre::eyre!("invalid stage in scenario: {err}"))
}

/// Splits a comma-separated title list written in a scenario.
pub fn title_list(titles: &str) -> Vec<String> {
    titles
        .split(',')
        .map(|title| title.trim().to_owned())
        .filter(|title| !title.is_empty())
        .collect()
}
