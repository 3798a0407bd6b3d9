#![doc(test(attr(deny(warnings))))]

//! Cashflow Core models a personal budget: manual and bank-imported
//! transactions, recurring fixed charges and transfers, a year-long
//! transaction generator, and twelve-month forecast series.

pub mod cli;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}
