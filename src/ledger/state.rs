use serde::{Deserialize, Serialize};

use super::{
    allocation::AllocationSplit,
    entry::{ExpenseEntry, IncomeEntry},
};

/// The single persisted aggregate: two running balances and the raw entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    #[serde(default, alias = "saldoPengeluaran")]
    pub spending_balance: u64,
    #[serde(default, alias = "saldoTabungan")]
    pub savings_balance: u64,
    #[serde(default)]
    pub income: Vec<IncomeEntry>,
    #[serde(default)]
    pub expense: Vec<ExpenseEntry>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.spending_balance == 0
            && self.savings_balance == 0
            && self.income.is_empty()
            && self.expense.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.income.len() + self.expense.len()
    }

    pub fn income_entry(&self, id: &str) -> Option<&IncomeEntry> {
        self.income.iter().find(|entry| entry.id == id)
    }

    pub fn expense_entry(&self, id: &str) -> Option<&ExpenseEntry> {
        self.expense.iter().find(|entry| entry.id == id)
    }

    pub fn remove_income(&mut self, id: &str) -> Option<IncomeEntry> {
        let idx = self.income.iter().position(|entry| entry.id == id)?;
        Some(self.income.remove(idx))
    }

    pub fn remove_expense(&mut self, id: &str) -> Option<ExpenseEntry> {
        let idx = self.expense.iter().position(|entry| entry.id == id)?;
        Some(self.expense.remove(idx))
    }

    pub fn total_income(&self) -> u64 {
        self.income
            .iter()
            .fold(0u64, |sum, entry| sum.saturating_add(entry.amount))
    }

    pub fn total_expense(&self) -> u64 {
        self.expense
            .iter()
            .fold(0u64, |sum, entry| sum.saturating_add(entry.amount))
    }

    /// Latest `createdAt` across both collections.
    pub fn last_created_at(&self) -> Option<i64> {
        let income = self.income.iter().map(|entry| entry.created_at);
        let expense = self.expense.iter().map(|entry| entry.created_at);
        income.chain(expense).max()
    }

    pub fn credit_split(&mut self, split: &AllocationSplit) {
        self.spending_balance = self.spending_balance.saturating_add(split.spending);
        self.savings_balance = self.savings_balance.saturating_add(split.savings);
    }

    /// Removes a split from both pools, stopping each at zero.
    pub fn debit_split_clamped(&mut self, split: &AllocationSplit) {
        self.spending_balance = self.spending_balance.saturating_sub(split.spending);
        self.savings_balance = self.savings_balance.saturating_sub(split.savings);
    }

    pub fn clear(&mut self) {
        self.spending_balance = 0;
        self.savings_balance = 0;
        self.income.clear();
        self.expense.clear();
    }
}
