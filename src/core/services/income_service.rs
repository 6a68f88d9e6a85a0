//! Recording and reversing income.

use chrono::NaiveDate;

use crate::ledger::{AllocationSplit, IncomeEntry, LedgerState};

use super::{positive_amount, ServiceResult, DATE_FORMAT};

/// The stored entry together with the split it applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeReceipt {
    pub entry: IncomeEntry,
    pub split: AllocationSplit,
}

pub struct IncomeService;

impl IncomeService {
    /// Credits 30% of `amount` to spending and the remainder to savings, then
    /// appends the entry.
    pub fn record(
        state: &mut LedgerState,
        amount: i64,
        source: &str,
        date: NaiveDate,
        created_at: i64,
    ) -> ServiceResult<IncomeReceipt> {
        let amount = positive_amount(amount)?;
        let split = AllocationSplit::of(amount);
        state.credit_split(&split);

        let entry = IncomeEntry::new(amount, source, date.format(DATE_FORMAT).to_string(), created_at);
        state.income.push(entry.clone());
        tracing::info!(
            id = %entry.id,
            amount,
            spending = split.spending,
            savings = split.savings,
            "income recorded"
        );
        Ok(IncomeReceipt { entry, split })
    }

    /// Removes an income entry and takes its split back out of both pools.
    ///
    /// The split is re-derived from the stored amount. Each pool stops at zero,
    /// so if the money was already spent the reversal is partial and the
    /// difference is dropped rather than borrowed from the other pool.
    pub fn remove(state: &mut LedgerState, id: &str) -> Option<IncomeEntry> {
        let entry = state.remove_income(id)?;
        let split = AllocationSplit::of(entry.amount);
        let spending_short = split.spending.saturating_sub(state.spending_balance);
        let savings_short = split.savings.saturating_sub(state.savings_balance);
        state.debit_split_clamped(&split);
        if spending_short > 0 || savings_short > 0 {
            tracing::warn!(
                id,
                spending_short,
                savings_short,
                "income reversal clamped at zero"
            );
        }
        tracing::info!(id, amount = entry.amount, "income deleted");
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::DEFAULT_INCOME_SOURCE;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn salary_is_split_thirty_seventy() {
        let mut state = LedgerState::new();
        let receipt = IncomeService::record(&mut state, 1_000_000, "Gaji", date(1), 1).unwrap();
        assert_eq!(state.spending_balance, 300_000);
        assert_eq!(state.savings_balance, 700_000);
        assert_eq!(receipt.split.spending, 300_000);
        assert_eq!(receipt.entry.date, "2024-01-01");
        assert_eq!(receipt.entry.source, "Gaji");
        assert_eq!(state.income.len(), 1);
    }

    #[test]
    fn total_increase_equals_amount_for_odd_values() {
        let mut state = LedgerState::new();
        for (idx, amount) in [1_i64, 3, 5, 17, 12_345, 999_999].into_iter().enumerate() {
            let before = state.spending_balance + state.savings_balance;
            IncomeService::record(&mut state, amount, "", date(1), idx as i64).unwrap();
            let after = state.spending_balance + state.savings_balance;
            assert_eq!(after - before, amount as u64);
        }
    }

    #[test]
    fn blank_source_is_defaulted() {
        let mut state = LedgerState::new();
        let receipt = IncomeService::record(&mut state, 10, "  ", date(1), 1).unwrap();
        assert_eq!(receipt.entry.source, DEFAULT_INCOME_SOURCE);
    }

    #[test]
    fn invalid_amount_leaves_state_untouched() {
        let mut state = LedgerState::new();
        let err = IncomeService::record(&mut state, 0, "Gaji", date(1), 1).unwrap_err();
        assert!(err.is_invalid_amount());
        assert!(state.is_empty());
    }

    #[test]
    fn removing_right_after_adding_restores_balances() {
        let mut state = LedgerState {
            spending_balance: 12,
            savings_balance: 34,
            ..LedgerState::default()
        };
        let receipt = IncomeService::record(&mut state, 777, "Bonus", date(2), 9).unwrap();
        IncomeService::remove(&mut state, &receipt.entry.id).unwrap();
        assert_eq!(state.spending_balance, 12);
        assert_eq!(state.savings_balance, 34);
        assert!(state.income.is_empty());
    }

    #[test]
    fn reversal_after_spending_is_clamped_not_borrowed() {
        let mut state = LedgerState::new();
        let receipt = IncomeService::record(&mut state, 1_000_000, "Gaji", date(1), 1).unwrap();
        // 250k of the 300k spending share has since gone.
        state.spending_balance = 50_000;
        IncomeService::remove(&mut state, &receipt.entry.id).unwrap();
        assert_eq!(state.spending_balance, 0);
        assert_eq!(state.savings_balance, 0);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut state = LedgerState::new();
        IncomeService::record(&mut state, 100, "Gaji", date(1), 1).unwrap();
        let snapshot = state.clone();
        assert!(IncomeService::remove(&mut state, "inc_999").is_none());
        assert_eq!(state, snapshot);
    }
}
