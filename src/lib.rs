#![doc(test(attr(deny(warnings))))]

//! Budget Split keeps a two-pool personal budget: every income is divided 30/70
//! between a spending pool and a savings pool, expenses draw from spending (and,
//! with consent, overflow into savings), and the whole ledger lives in a single
//! persisted record.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Split tracing initialized.");
    });
}
