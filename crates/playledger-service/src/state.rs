//! Application state.

use std::sync::Arc;

use playledger_oracle::ReceiptOracle;
use playledger_store::RecordStore;

use crate::config::ServiceConfig;
use crate::ledger::PurchaseLedger;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The purchase ledger coordinating store and oracle.
    pub ledger: Arc<PurchaseLedger>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create application state over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        oracle: Arc<dyn ReceiptOracle>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            ledger: Arc::new(PurchaseLedger::new(store, oracle)),
            config,
        }
    }
}
