#![doc(test(attr(deny(warnings))))]

//! Area Cost Core offers catalog, unit-conversion, and per-area ledger
//! primitives that power material cost estimation workflows and CLIs.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod estimate;
pub mod format;
pub mod ingest;
pub mod ledger;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Area Cost Core tracing initialized.");
    });
}
