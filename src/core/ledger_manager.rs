use chrono::NaiveDate;

use crate::core::clock::{Clock, SystemClock};
use crate::core::services::{
    DeleteOutcome, ExpenseOutcome, ExpensePlan, ExpenseService, History, HistoryService,
    IncomeReceipt, IncomeService, ServiceResult, SummaryService, Totals, TransactionService,
};
use crate::ledger::{EntryKind, LedgerState};
use crate::storage::{encode_state, StorageBackend};

/// Facade that owns the ledger state and keeps the storage slot in step with it.
///
/// The slot is read once when the manager is opened and rewritten after every
/// mutation. Storage failures are logged and remembered but never returned:
/// the in-memory state stays authoritative and usable.
pub struct LedgerManager {
    state: LedgerState,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    last_created_at: i64,
    load_warnings: Vec<String>,
    last_persist_error: Option<String>,
}

impl LedgerManager {
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let (state, load_warnings) = match storage.load() {
            Ok(report) => {
                for warning in &report.warnings {
                    tracing::warn!(location = %storage.describe(), "{warning}");
                }
                if report.found {
                    tracing::info!(
                        location = %storage.describe(),
                        entries = report.state.entry_count(),
                        "ledger loaded"
                    );
                }
                (report.state, report.warnings)
            }
            Err(err) => {
                tracing::warn!(
                    location = %storage.describe(),
                    error = %err,
                    "could not load ledger; starting empty"
                );
                (LedgerState::default(), vec![err.to_string()])
            }
        };
        let last_created_at = state.last_created_at().unwrap_or(i64::MIN);
        Self {
            state,
            storage,
            clock,
            last_created_at,
            load_warnings,
            last_persist_error: None,
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Problems met while loading: skipped entries, defaulted fields, or the
    /// reason the slot could not be read at all.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// Message of the most recent failed write, cleared by the next success.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn record_income(
        &mut self,
        amount: i64,
        source: &str,
        date: NaiveDate,
    ) -> ServiceResult<IncomeReceipt> {
        // Validate before consuming a timestamp.
        crate::core::services::positive_amount(amount)?;
        let created_at = self.next_created_at();
        let receipt = IncomeService::record(&mut self.state, amount, source, date, created_at)?;
        self.persist();
        Ok(receipt)
    }

    pub fn plan_expense(&self, amount: i64) -> ServiceResult<ExpensePlan> {
        ExpenseService::plan(&self.state, amount)
    }

    pub fn commit_expense(
        &mut self,
        plan: &ExpensePlan,
        category: &str,
        date: NaiveDate,
        overflow_consent: bool,
    ) -> ServiceResult<ExpenseOutcome> {
        let created_at = self.peek_created_at();
        let outcome = ExpenseService::commit(
            &mut self.state,
            plan,
            category,
            date,
            created_at,
            overflow_consent,
        )?;
        if let ExpenseOutcome::Recorded(_) = outcome {
            self.last_created_at = created_at;
            self.persist();
        }
        Ok(outcome)
    }

    /// Plans and commits in one call. `confirm_overflow` is asked only when
    /// the spending pool cannot cover the amount.
    pub fn record_expense<F>(
        &mut self,
        amount: i64,
        category: &str,
        date: NaiveDate,
        confirm_overflow: F,
    ) -> ServiceResult<ExpenseOutcome>
    where
        F: FnOnce(&ExpensePlan) -> bool,
    {
        let plan = self.plan_expense(amount)?;
        let consent = plan.needs_overflow_consent && confirm_overflow(&plan);
        self.commit_expense(&plan, category, date, consent)
    }

    pub fn delete_transaction(&mut self, id: &str, kind: EntryKind) -> DeleteOutcome {
        let outcome = TransactionService::delete(&mut self.state, id, kind);
        if outcome.is_removed() {
            self.persist();
        }
        outcome
    }

    /// Irreversible; callers confirm with the user first.
    pub fn reset_all(&mut self) {
        TransactionService::reset(&mut self.state);
        self.persist();
    }

    pub fn list_all(&self) -> History<'_> {
        HistoryService::list_all(&self.state)
    }

    pub fn list_recent(&self, n: usize) -> History<'_> {
        HistoryService::list_recent(&self.state, n)
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(&self.state)
    }

    /// The record exactly as it is written to storage.
    pub fn export_json(&self) -> crate::storage::Result<String> {
        encode_state(&self.state)
    }

    fn peek_created_at(&self) -> i64 {
        let now = self.clock.now_millis();
        now.max(self.last_created_at.saturating_add(1))
    }

    fn next_created_at(&mut self) -> i64 {
        let created_at = self.peek_created_at();
        self.last_created_at = created_at;
        created_at
    }

    fn persist(&mut self) {
        match self.storage.save(&self.state) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                tracing::warn!(
                    location = %self.storage.describe(),
                    error = %err,
                    "could not persist ledger; keeping in-memory state"
                );
                self.last_persist_error = Some(err.to_string());
            }
        }
    }
}
