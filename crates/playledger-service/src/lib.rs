//! Playledger service: purchase verification and save-data bridge.
//!
//! This crate hosts [`PurchaseLedger`] — the coordinator that verifies
//! Google Play receipts with the oracle and persists them idempotently
//! through the document store — plus the Axum HTTP surface the game client
//! talks to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod handlers;
pub mod ledger;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use ledger::PurchaseLedger;
pub use routes::create_router;
pub use state::AppState;
