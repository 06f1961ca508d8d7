//! Shared fixtures for board unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::board::{
    adapters::InMemoryStorage,
    services::{BoardConfig, BoardStore},
};

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
                .single()
                .expect("valid fixed timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub type TestStore = BoardStore<InMemoryStorage, FixedClock>;

pub fn fixed_clock() -> FixedClock {
    FixedClock::at(2024, 3, 14, 9, 30)
}

pub fn store_with(storage: InMemoryStorage, config: BoardConfig) -> TestStore {
    BoardStore::new(storage, fixed_clock(), config)
}

pub fn titles(store: &TestStore, stage: crate::board::domain::Stage) -> Vec<String> {
    store
        .tasks(stage)
        .iter()
        .map(|task| task.title().to_owned())
        .collect()
}
