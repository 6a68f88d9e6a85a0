pub mod expense_service;
pub mod history_service;
pub mod income_service;
pub mod summary_service;
pub mod transaction_service;

pub use expense_service::{ExpenseOutcome, ExpensePlan, ExpenseReceipt, ExpenseService};
pub use history_service::{History, HistoryService, TransactionView};
pub use income_service::{IncomeReceipt, IncomeService};
pub use summary_service::{SummaryService, Totals};
pub use transaction_service::{DeleteOutcome, TransactionService};

use crate::errors::LedgerError;

/// Calendar dates are stored in the ISO form produced by a date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

impl ServiceError {
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, ServiceError::Ledger(LedgerError::InvalidAmount(_)))
    }
}

/// Rejects zero and negative amounts before any state is touched.
pub fn positive_amount(amount: i64) -> ServiceResult<u64> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be greater than zero (got {amount})"
        ))
        .into());
    }
    Ok(amount.unsigned_abs())
}
