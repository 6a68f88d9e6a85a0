//! Ledger domain models, persistence-friendly types, and helpers.

pub mod allocation;
pub mod entry;
pub mod state;

pub use allocation::{AllocationSplit, SPENDING_SHARE_PERCENT};
pub use entry::{
    EntryKind, ExpenseEntry, IncomeEntry, DEFAULT_EXPENSE_CATEGORY, DEFAULT_INCOME_SOURCE,
};
pub use state::LedgerState;
