//! Merged, newest-first view over both entry collections.

use crate::ledger::{EntryKind, LedgerState};

/// One entry from either collection, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionView<'a> {
    pub kind: EntryKind,
    pub id: &'a str,
    pub amount: u64,
    pub label: &'a str,
    pub date: &'a str,
    pub created_at: i64,
}

/// A sorted snapshot of the ledger's entries. Iterating does not consume it,
/// so the same history can be walked any number of times.
#[derive(Debug, Clone)]
pub struct History<'a> {
    items: Vec<TransactionView<'a>>,
}

impl<'a> History<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &TransactionView<'a>> + '_ {
        self.items.iter()
    }

    /// Keeps only the `n` most recent entries.
    pub fn recent(mut self, n: usize) -> Self {
        self.items.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[TransactionView<'a>] {
        &self.items
    }
}

impl<'h, 'a> IntoIterator for &'h History<'a> {
    type Item = &'h TransactionView<'a>;
    type IntoIter = std::slice::Iter<'h, TransactionView<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub struct HistoryService;

impl HistoryService {
    /// All entries sorted by `createdAt` descending. Equal timestamps keep
    /// insertion order, incomes before expenses.
    pub fn list_all(state: &LedgerState) -> History<'_> {
        let income = state.income.iter().map(|entry| TransactionView {
            kind: EntryKind::Income,
            id: &entry.id,
            amount: entry.amount,
            label: entry.label(),
            date: &entry.date,
            created_at: entry.created_at,
        });
        let expense = state.expense.iter().map(|entry| TransactionView {
            kind: EntryKind::Expense,
            id: &entry.id,
            amount: entry.amount,
            label: entry.label(),
            date: &entry.date,
            created_at: entry.created_at,
        });

        let mut items: Vec<_> = income.chain(expense).collect();
        // `sort_by` is stable, which preserves insertion order on ties.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        History { items }
    }

    pub fn list_recent(state: &LedgerState, n: usize) -> History<'_> {
        Self::list_all(state).recent(n)
    }
}
