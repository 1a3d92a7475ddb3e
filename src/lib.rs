#![doc(test(attr(deny(warnings))))]

//! Trip Ledger turns shared trip budgets and recorded spending into member
//! balances, remaining-budget views and settlement plans.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod utils;

pub use trip_config;
pub use trip_core;
pub use trip_domain;
pub use trip_storage_json;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trip Ledger tracing initialized.");
    });
}
