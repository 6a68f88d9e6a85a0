use serde::Serialize;

use crate::ledger::{AllocationSplit, LedgerState};

/// Dashboard figures. The targets and progress values are derived for display
/// and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: u64,
    pub total_expense: u64,
    pub spending_balance: u64,
    pub savings_balance: u64,
    /// What spending would hold if every income was untouched.
    pub spending_target: u64,
    pub savings_target: u64,
    /// `balance / target` as a percentage, capped at 100; 0 without a target.
    pub spending_progress: f64,
    pub savings_progress: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(state: &LedgerState) -> Totals {
        let total_income = state.total_income();
        let targets = AllocationSplit::of(total_income);
        Totals {
            total_income,
            total_expense: state.total_expense(),
            spending_balance: state.spending_balance,
            savings_balance: state.savings_balance,
            spending_target: targets.spending,
            savings_target: targets.savings,
            spending_progress: progress(state.spending_balance, targets.spending),
            savings_progress: progress(state.savings_balance, targets.savings),
        }
    }
}

fn progress(balance: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    (balance as f64 / target as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ExpenseEntry, IncomeEntry};

    #[test]
    fn empty_ledger_has_zero_progress() {
        let totals = SummaryService::totals(&LedgerState::new());
        assert_eq!(totals.total_income, 0);
        assert_eq!(totals.spending_progress, 0.0);
        assert_eq!(totals.savings_progress, 0.0);
    }

    #[test]
    fn progress_reflects_spent_share() {
        let mut state = LedgerState {
            spending_balance: 150_000,
            savings_balance: 700_000,
            ..LedgerState::default()
        };
        state
            .income
            .push(IncomeEntry::new(1_000_000, "Gaji", "2024-01-01", 1));
        state
            .expense
            .push(ExpenseEntry::new(150_000, "Makan", "2024-01-02", 2));

        let totals = SummaryService::totals(&state);
        assert_eq!(totals.total_income, 1_000_000);
        assert_eq!(totals.total_expense, 150_000);
        assert_eq!(totals.spending_target, 300_000);
        assert_eq!(totals.savings_target, 700_000);
        assert!((totals.spending_progress - 50.0).abs() < f64::EPSILON);
        assert!((totals.savings_progress - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_capped_at_one_hundred() {
        let mut state = LedgerState {
            spending_balance: 900,
            ..LedgerState::default()
        };
        state.income.push(IncomeEntry::new(1_000, "", "", 1));
        let totals = SummaryService::totals(&state);
        assert_eq!(totals.spending_progress, 100.0);
    }
}
