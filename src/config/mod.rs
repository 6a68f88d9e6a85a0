use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::LedgerError,
    storage::json_backend::DEFAULT_STATE_FILE,
};

/// User preferences for display and storage location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_marker: String,
    pub grouping_separator: char,
    /// How many entries the dashboard lists.
    pub recent_limit: usize,
    pub state_file_name: String,
    pub color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_marker: "Rp".into(),
            grouping_separator: '.',
            recent_limit: 5,
            state_file_name: DEFAULT_STATE_FILE.into(),
            color_enabled: true,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("`{}` is invalid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the ledger slot lives in.
    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
