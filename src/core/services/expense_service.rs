//! Recording and reversing expenses.
//!
//! Recording is two-phase: [`ExpenseService::plan`] reports whether the
//! spending pool covers the amount, and [`ExpenseService::commit`] applies it
//! once the caller knows whether the user agreed to cover any shortfall from
//! savings. The service itself never prompts.

use chrono::NaiveDate;

use crate::ledger::{ExpenseEntry, LedgerState};

use super::{positive_amount, ServiceResult, DATE_FORMAT};

/// What recording an expense of `amount` would do to the current balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpensePlan {
    pub amount: u64,
    pub spending_before: u64,
    pub savings_before: u64,
    /// `spending_before - amount`; negative when spending cannot cover it.
    pub projected_spending: i128,
    /// Part of the amount that would have to come out of savings.
    pub shortfall: u64,
    /// Part of the shortfall savings cannot cover either; it is dropped.
    pub uncovered: u64,
    pub needs_overflow_consent: bool,
}

impl ExpensePlan {
    fn against(state: &LedgerState, amount: u64) -> Self {
        let spending_before = state.spending_balance;
        let savings_before = state.savings_balance;
        let shortfall = amount.saturating_sub(spending_before);
        Self {
            amount,
            spending_before,
            savings_before,
            projected_spending: i128::from(spending_before) - i128::from(amount),
            shortfall,
            uncovered: shortfall.saturating_sub(savings_before),
            needs_overflow_consent: shortfall > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseReceipt {
    pub entry: ExpenseEntry,
    pub used_savings: bool,
    pub shortfall: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseOutcome {
    Recorded(ExpenseReceipt),
    /// The user would not cover the shortfall from savings; nothing changed.
    Declined { shortfall: u64 },
}

impl ExpenseOutcome {
    pub fn receipt(&self) -> Option<&ExpenseReceipt> {
        match self {
            ExpenseOutcome::Recorded(receipt) => Some(receipt),
            ExpenseOutcome::Declined { .. } => None,
        }
    }

    pub fn is_declined(&self) -> bool {
        matches!(self, ExpenseOutcome::Declined { .. })
    }
}

pub struct ExpenseService;

impl ExpenseService {
    pub fn plan(state: &LedgerState, amount: i64) -> ServiceResult<ExpensePlan> {
        let amount = positive_amount(amount)?;
        let plan = ExpensePlan::against(state, amount);
        tracing::debug!(
            amount,
            shortfall = plan.shortfall,
            needs_consent = plan.needs_overflow_consent,
            "expense planned"
        );
        Ok(plan)
    }

    /// Applies a planned expense.
    ///
    /// The plan is re-derived against the current balances, so a plan made
    /// before another mutation cannot apply stale numbers. `overflow_consent`
    /// is only consulted when spending falls short, and only covers a
    /// shortfall no larger than the one the plan showed.
    pub fn commit(
        state: &mut LedgerState,
        plan: &ExpensePlan,
        category: &str,
        date: NaiveDate,
        created_at: i64,
        overflow_consent: bool,
    ) -> ServiceResult<ExpenseOutcome> {
        let current = ExpensePlan::against(state, plan.amount);

        let used_savings = if current.needs_overflow_consent {
            if !overflow_consent || current.shortfall > plan.shortfall {
                tracing::info!(
                    amount = current.amount,
                    shortfall = current.shortfall,
                    "expense cancelled; savings overflow declined"
                );
                return Ok(ExpenseOutcome::Declined {
                    shortfall: current.shortfall,
                });
            }
            state.spending_balance = 0;
            state.savings_balance = state.savings_balance.saturating_sub(current.shortfall);
            if current.uncovered > 0 {
                tracing::warn!(
                    uncovered = current.uncovered,
                    "savings could not cover the whole shortfall"
                );
            }
            true
        } else {
            state.spending_balance -= current.amount;
            false
        };

        let entry = ExpenseEntry::new(
            current.amount,
            category,
            date.format(DATE_FORMAT).to_string(),
            created_at,
        );
        state.expense.push(entry.clone());
        tracing::info!(
            id = %entry.id,
            amount = current.amount,
            used_savings,
            shortfall = current.shortfall,
            "expense recorded"
        );
        Ok(ExpenseOutcome::Recorded(ExpenseReceipt {
            entry,
            used_savings,
            shortfall: current.shortfall,
        }))
    }

    /// Removes an expense and credits its full amount back to spending.
    ///
    /// Savings consumed by an overflow at recording time are not restored.
    pub fn remove(state: &mut LedgerState, id: &str) -> Option<ExpenseEntry> {
        let entry = state.remove_expense(id)?;
        state.spending_balance = state.spending_balance.saturating_add(entry.amount);
        tracing::info!(id, amount = entry.amount, "expense deleted");
        Some(entry)
    }
}
