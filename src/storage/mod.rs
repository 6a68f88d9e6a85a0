//! Persistence for the single ledger record.

pub mod decode;
pub mod json_backend;
pub mod memory;

use crate::{errors::LedgerError, ledger::LedgerState};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the durable slot that holds the serialized ledger.
pub trait StorageBackend: Send + Sync {
    /// Reads the stored record. A missing record is not an error and yields
    /// defaults; unreadable or unparseable records are reported as errors.
    fn load(&self) -> Result<LoadReport>;

    /// Replaces the stored record with `state`.
    fn save(&self, state: &LedgerState) -> Result<()>;

    /// Human readable location, used in log lines.
    fn describe(&self) -> String;
}

/// Outcome of reading the slot: the recovered state plus anything that had to
/// be skipped or defaulted along the way.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub state: LedgerState,
    pub warnings: Vec<String>,
    pub found: bool,
}

impl LoadReport {
    pub fn missing() -> Self {
        Self::default()
    }
}

pub fn encode_state(state: &LedgerState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub use decode::decode_state;
pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
