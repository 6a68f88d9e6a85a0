use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::LedgerError,
    ledger::LedgerState,
};

use super::{decode_state, encode_state, LoadReport, Result, StorageBackend};

pub const DEFAULT_STATE_FILE: &str = "keuangan3070_state.json";

/// File-backed slot holding the ledger as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, file_name: Option<&str>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        let file_name = file_name.unwrap_or(DEFAULT_STATE_FILE);
        Ok(Self {
            path: PathResolver::state_file_in(&base, file_name),
        })
    }

    /// Uses `path` as the slot directly, without creating any directories.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<LoadReport> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadReport::missing()),
            Err(err) => {
                return Err(LedgerError::StorageUnavailable(format!(
                    "cannot read `{}`: {err}",
                    self.path.display()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(LoadReport::missing());
        }
        decode_state(&raw)
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let json = encode_state(state)?;
        write_atomic(&self.path, &json).map_err(|err| match err {
            LedgerError::Io(io) => LedgerError::StorageUnavailable(format!(
                "cannot write `{}`: {io}",
                self.path.display()
            )),
            other => other,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
