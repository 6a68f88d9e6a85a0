#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use budget_split::{
    core::{LedgerManager, ManualClock},
    storage::JsonStorage,
};
use chrono::NaiveDate;
use tempfile::TempDir;

/// 2024-01-01T00:00:00Z
pub const JAN_1_MILLIS: i64 = 1_704_067_200_000;

pub struct TestEnv {
    pub clock: Arc<ManualClock>,
    pub slot: PathBuf,
    _dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        Self {
            clock: Arc::new(ManualClock::new(JAN_1_MILLIS)),
            slot: dir.path().join("keuangan3070_state.json"),
            _dir: dir,
        }
    }

    /// Opens a manager on the shared slot, as a fresh process start would.
    pub fn open(&self) -> LedgerManager {
        LedgerManager::open_with_clock(
            Box::new(JsonStorage::at_path(&self.slot)),
            Box::new(Arc::clone(&self.clock)),
        )
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
