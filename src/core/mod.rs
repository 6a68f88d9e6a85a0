//! Business rules for the two-pool ledger and the facade that owns it.

pub mod clock;
pub mod ledger_manager;
pub mod services;
pub mod utils;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger_manager::LedgerManager;
