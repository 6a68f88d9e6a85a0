//! Kind-dispatched deletion and full reset.

use crate::ledger::{EntryKind, LedgerState};

use super::{ExpenseService, IncomeService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { kind: EntryKind, amount: u64 },
    /// No entry with that id in the requested collection; nothing changed.
    NotFound,
}

impl DeleteOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, DeleteOutcome::Removed { .. })
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Deletes the entry and reverses its effect on the balances.
    pub fn delete(state: &mut LedgerState, id: &str, kind: EntryKind) -> DeleteOutcome {
        let amount = match kind {
            EntryKind::Income => IncomeService::remove(state, id).map(|entry| entry.amount),
            EntryKind::Expense => ExpenseService::remove(state, id).map(|entry| entry.amount),
        };
        match amount {
            Some(amount) => DeleteOutcome::Removed { kind, amount },
            None => {
                tracing::debug!(id, %kind, "delete ignored; no such entry");
                DeleteOutcome::NotFound
            }
        }
    }

    /// Zeroes both balances and drops every entry.
    pub fn reset(state: &mut LedgerState) {
        let dropped = state.entry_count();
        state.clear();
        tracing::info!(dropped, "ledger reset");
    }
}
