//! Google Play receipt verification for playledger.
//!
//! This crate provides the [`ReceiptOracle`] abstraction the ledger verifies
//! receipts through, plus [`PlayVerifier`], the production implementation
//! backed by the Google Play Developer API
//! (`purchases.products.get` / `purchases.subscriptions.get`).
//!
//! # Example
//!
//! ```no_run
//! use playledger_oracle::{GoogleServiceAccount, PlayVerifier, ReceiptOracle};
//!
//! # async fn example(receipt: &playledger_core::Receipt) -> Result<(), playledger_oracle::OracleError> {
//! let account = GoogleServiceAccount::from_file(".secrets/google-play.json")?;
//! let verifier = PlayVerifier::new(account)?;
//!
//! let response = verifier.verify_subscription(receipt).await?;
//! if response.has_pending_price_change() {
//!     println!("price change awaiting acceptance");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;
mod types;

pub use client::PlayVerifier;
pub use config::GoogleServiceAccount;
pub use error::OracleError;
pub use types::{PriceChange, VerifyResponse, PRICE_CHANGE_PENDING};

use async_trait::async_trait;
use playledger_core::Receipt;

/// The receipt verification contract the ledger depends on.
///
/// Given a parsed receipt, an oracle confirms its authenticity with the
/// billing platform or reports that it is invalid or unreachable. The
/// returned platform response may carry subscription price-change state.
#[async_trait]
pub trait ReceiptOracle: Send + Sync {
    /// Verify a one-time product purchase.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is invalid or the platform is
    /// unreachable.
    async fn verify_one_time(&self, receipt: &Receipt) -> Result<VerifyResponse, OracleError>;

    /// Verify a subscription purchase.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt is invalid or the platform is
    /// unreachable.
    async fn verify_subscription(&self, receipt: &Receipt) -> Result<VerifyResponse, OracleError>;
}
