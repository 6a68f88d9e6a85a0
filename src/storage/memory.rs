use std::sync::Mutex;

use crate::{errors::LedgerError, ledger::LedgerState};

use super::{decode_state, encode_state, LoadReport, Result, StorageBackend};

/// In-process slot. Stores the same serialized text the file backend would,
/// so the decode path is shared.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw text, which need not be valid.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            fail_writes: false,
        }
    }

    /// A slot that rejects every write, for exercising recovery paths.
    pub fn read_only() -> Self {
        Self {
            slot: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<LoadReport> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| LedgerError::StorageUnavailable("memory slot poisoned".into()))?;
        match slot.as_deref() {
            Some(raw) => decode_state(raw),
            None => Ok(LoadReport::missing()),
        }
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        if self.fail_writes {
            return Err(LedgerError::StorageUnavailable(
                "memory slot is read-only".into(),
            ));
        }
        let json = encode_state(state)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| LedgerError::StorageUnavailable("memory slot poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_loads_defaults() {
        let report = MemoryStorage::new().load().unwrap();
        assert!(!report.found);
        assert!(report.state.is_empty());
    }

    #[test]
    fn save_replaces_slot() {
        let storage = MemoryStorage::with_raw("garbage");
        let mut state = LedgerState::new();
        state.savings_balance = 42;
        storage.save(&state).unwrap();
        assert_eq!(storage.load().unwrap().state.savings_balance, 42);
        assert!(storage.raw().unwrap().contains("\"savingsBalance\": 42"));
    }

    #[test]
    fn read_only_slot_rejects_writes() {
        let storage = MemoryStorage::read_only();
        assert!(storage.save(&LedgerState::new()).is_err());
    }
}
