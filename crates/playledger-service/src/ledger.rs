//! The purchase ledger: verify-then-commit orchestration.
//!
//! `PurchaseLedger` coordinates the two injected collaborators — the
//! document store and the receipt oracle — to implement the bridge's five
//! operations. Every operation returns an [`OperationResult`]; collaborator
//! errors are folded into failed results at a single translation point and
//! nothing propagates past the ledger's boundary.

use std::sync::Arc;

use serde::Serialize;

use playledger_core::{OperationResult, PurchaseKind, PurchaseRecord, Receipt, UserRecord};
use playledger_oracle::ReceiptOracle;
use playledger_store::{Collection, Document, RecordStore};

/// Message on a successfully committed purchase.
pub const MSG_SAVED: &str = "Save in database";

/// Message when a purchase token has already been recorded.
pub const MSG_TOKEN_EXISTS: &str = "Purchase token already exists in the database";

/// Message when a player record or game data is missing.
pub const MSG_NOT_REGISTERED: &str = "User is not registered in the database";

/// Message when no denormalized subscription receipt exists for a player.
pub const MSG_NO_SUBSCRIPTION: &str = "No active subscription";

/// Message when the platform reports an unaccepted pending price change.
pub const MSG_PRICE_CHANGE_PENDING: &str =
    "Subscription price change is pending and has not been accepted by user";

/// Message when no pending price change exists.
pub const MSG_PRICE_UNCHANGED: &str =
    "Subscription price has not changed or has been accepted by user";

/// Coordinates receipt verification and idempotent persistence.
///
/// Holds no mutable state of its own; both collaborator handles are immutable
/// after construction and safe to share across concurrent calls. No internal
/// retries or timeouts — every failure is surfaced once and cancellation is
/// the caller's responsibility.
pub struct PurchaseLedger {
    store: Arc<dyn RecordStore>,
    oracle: Arc<dyn ReceiptOracle>,
}

impl PurchaseLedger {
    /// Create a ledger over the given collaborators.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, oracle: Arc<dyn ReceiptOracle>) -> Self {
        Self { store, oracle }
    }

    /// Mark a player as registered, preserving any existing fields.
    pub async fn register(&self, user_id: &str) -> OperationResult {
        let record = UserRecord {
            registered: Some(true),
            game_data: None,
        };
        let fields = match document_of(&record) {
            Ok(fields) => fields,
            Err(err) => return OperationResult::from_err(err),
        };

        match self.store.set(Collection::Users, user_id, fields, true).await {
            Ok(()) => OperationResult::ok(),
            Err(err) => OperationResult::from_err(err),
        }
    }

    /// Merge-upsert a player's opaque game-state blob.
    pub async fn save_game_data(&self, user_id: &str, game_data: &str) -> OperationResult {
        let record = UserRecord {
            registered: None,
            game_data: Some(game_data.to_owned()),
        };
        let fields = match document_of(&record) {
            Ok(fields) => fields,
            Err(err) => return OperationResult::from_err(err),
        };

        match self.store.set(Collection::Users, user_id, fields, true).await {
            Ok(()) => OperationResult::ok(),
            Err(err) => OperationResult::from_err(err),
        }
    }

    /// Read back a player's game-state blob.
    ///
    /// A missing record, missing game data, and empty game data all answer
    /// with the same failure message; the game client cannot tell those
    /// apart, and existing clients depend on that message.
    pub async fn get_game_data(&self, user_id: &str) -> OperationResult {
        let document = match self.store.get(Collection::Users, user_id).await {
            Ok(Some(document)) => document,
            Ok(None) => return OperationResult::failure(MSG_NOT_REGISTERED),
            Err(err) => return OperationResult::from_err(err),
        };

        let record: UserRecord =
            match serde_json::from_value(serde_json::Value::Object(document)) {
                Ok(record) => record,
                Err(err) => return OperationResult::from_err(err),
            };

        match record.game_data {
            Some(data) if !data.is_empty() => OperationResult::ok_payload("", data),
            _ => OperationResult::failure(MSG_NOT_REGISTERED),
        }
    }

    /// Check whether the player's active subscription has a pending,
    /// unaccepted price change.
    ///
    /// Reads the denormalized subscription receipt, re-verifies it with the
    /// platform, and inspects the response's price-change state.
    pub async fn check_price_change(&self, user_id: &str) -> OperationResult {
        let document = match self.store.get(Collection::Subscriptions, user_id).await {
            Ok(Some(document)) => document,
            Ok(None) => return OperationResult::failure(MSG_NO_SUBSCRIPTION),
            Err(err) => return OperationResult::from_err(err),
        };

        let stored: Receipt = match serde_json::from_value(serde_json::Value::Object(document)) {
            Ok(receipt) => receipt,
            Err(err) => return OperationResult::from_err(err),
        };

        // Only the three identifying fields go back to the platform.
        let receipt = Receipt {
            product_id: stored.product_id,
            package_name: stored.package_name,
            purchase_token: stored.purchase_token,
            user_id: None,
            extra: serde_json::Map::new(),
        };

        match self.oracle.verify_subscription(&receipt).await {
            Ok(response) if response.has_pending_price_change() => {
                tracing::info!(user_id = %user_id, product_id = %receipt.product_id, "Pending subscription price change");
                OperationResult::ok_payload(MSG_PRICE_CHANGE_PENDING, receipt.product_id)
            }
            Ok(_) => OperationResult::failure(MSG_PRICE_UNCHANGED),
            Err(err) => OperationResult::from_err(err),
        }
    }

    /// Verify a wrapped receipt payload with the platform and commit it.
    ///
    /// Parses and classifies the receipt, verifies it with the oracle, then
    /// commits it keyed by purchase token; for subscriptions, additionally
    /// writes the receipt through to the player's subscription document.
    ///
    /// The duplicate-token check is a read followed by a write with no
    /// atomic compare-and-set: two racing calls for the same token can both
    /// observe "absent" and both commit. Callers needing strict exactly-once
    /// accounting must serialize calls per purchase token externally.
    pub async fn verify_and_save(&self, user_id: &str, raw_payload: &str) -> OperationResult {
        let receipt = match Receipt::from_wrapped_payload(raw_payload) {
            Ok(receipt) => receipt,
            Err(err) => return OperationResult::from_err(err),
        };
        let kind = receipt.kind();

        tracing::debug!(
            user_id = %user_id,
            product_id = %receipt.product_id,
            sku_type = kind.sku_type(),
            "Verifying purchase receipt"
        );

        let verified = match kind {
            PurchaseKind::OneTime => self.oracle.verify_one_time(&receipt).await,
            PurchaseKind::Subscription => self.oracle.verify_subscription(&receipt).await,
        };
        if let Err(err) = verified {
            tracing::warn!(user_id = %user_id, error = %err, "Receipt verification failed");
            return OperationResult::from_err(err);
        }

        let committed = self.commit_purchase(user_id, receipt.clone()).await;
        if kind == PurchaseKind::Subscription && committed.success {
            return self.save_subscription_receipt(user_id, receipt).await;
        }
        committed
    }

    /// Commit a verified receipt keyed by purchase token, rejecting replays.
    async fn commit_purchase(&self, user_id: &str, receipt: Receipt) -> OperationResult {
        let token = receipt.purchase_token.clone();
        let record = PurchaseRecord::stamp(user_id, receipt);
        let fields = match document_of(&record) {
            Ok(fields) => fields,
            Err(err) => return OperationResult::from_err(err),
        };

        match self.store.get(Collection::Purchases, &token).await {
            Ok(Some(_)) => OperationResult::failure(MSG_TOKEN_EXISTS),
            Ok(None) => match self.store.set(Collection::Purchases, &token, fields, false).await {
                Ok(()) => {
                    tracing::info!(user_id = %user_id, "Purchase committed");
                    OperationResult::ok_message(MSG_SAVED)
                }
                Err(err) => OperationResult::from_err(err),
            },
            Err(err) => OperationResult::from_err(err),
        }
    }

    /// Overwrite the player's denormalized subscription receipt.
    ///
    /// Unconditional overwrite: the most recent subscription receipt wins,
    /// keeping price-change lookups a single read.
    async fn save_subscription_receipt(&self, user_id: &str, receipt: Receipt) -> OperationResult {
        let record = PurchaseRecord::stamp(user_id, receipt);
        let fields = match document_of(&record) {
            Ok(fields) => fields,
            Err(err) => return OperationResult::from_err(err),
        };

        match self
            .store
            .set(Collection::Subscriptions, user_id, fields, false)
            .await
        {
            Ok(()) => OperationResult::ok_message(MSG_SAVED),
            Err(err) => OperationResult::from_err(err),
        }
    }
}

/// Serialize a record into a document map.
fn document_of<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
