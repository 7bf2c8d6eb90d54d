//! Receipt extraction, parsing, and purchase classification.
//!
//! The game client forwards the Google Play receipt inside the Unity IAP
//! envelope: a JSON wrapper whose `json` field holds the receipt as an escaped
//! string, followed by a detached `signature` field. Extraction strips the
//! escaping and slices out the receipt object; the slice bounds are coupled to
//! that envelope layout and kept as-is for wire compatibility with the
//! shipped client.

use serde::{Deserialize, Serialize};

/// Product IDs containing this substring are treated as subscriptions.
const SUBSCRIPTION_MARKER: &str = "subscription";

/// Errors produced while unwrapping or parsing a receipt payload.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    /// The envelope does not contain an expected marker token.
    #[error("receipt envelope is missing the \"{0}\" marker")]
    MissingMarker(&'static str),

    /// The markers are present but not in a sliceable arrangement.
    #[error("receipt envelope is malformed")]
    MalformedEnvelope,

    /// The extracted slice is not a valid JSON receipt.
    #[error("receipt is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Whether a purchase is a one-time product or a recurring subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseKind {
    /// Non-recurring product purchase (SKU type `inapp`).
    OneTime,
    /// Recurring product purchase (SKU type `subs`).
    Subscription,
}

impl PurchaseKind {
    /// Classify a product ID by its subscription marker substring.
    #[must_use]
    pub fn classify(product_id: &str) -> Self {
        if product_id.contains(SUBSCRIPTION_MARKER) {
            Self::Subscription
        } else {
            Self::OneTime
        }
    }

    /// The Google Play SKU type string for this kind.
    #[must_use]
    pub const fn sku_type(self) -> &'static str {
        match self {
            Self::OneTime => "inapp",
            Self::Subscription => "subs",
        }
    }
}

/// A parsed purchase receipt.
///
/// Only the fields the ledger inspects are typed; everything else the
/// platform put in the receipt is carried through verbatim in `extra` and
/// persisted untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Product identifier (SKU).
    pub product_id: String,

    /// Package name of the purchasing app.
    pub package_name: String,

    /// Opaque unique token issued per transaction; the de-duplication key.
    pub purchase_token: String,

    /// Owning user, stamped by the ledger before persisting. Absent on
    /// receipts fresh off the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// All remaining receipt fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Receipt {
    /// Unwrap and parse a receipt from the client's wrapped payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError`] if the envelope markers are missing or the
    /// extracted slice is not valid JSON.
    pub fn from_wrapped_payload(raw: &str) -> Result<Self, ReceiptError> {
        let json = extract_receipt_json(raw)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Classify this receipt by its product ID.
    #[must_use]
    pub fn kind(&self) -> PurchaseKind {
        PurchaseKind::classify(&self.product_id)
    }
}

/// Slice the receipt JSON object out of the client's wrapped payload.
///
/// Strips every backslash, then takes the substring starting two characters
/// before the first `orderId` (the object's opening `{"`) and ending three
/// characters before the first `signature` (dropping the quote that closed
/// the embedded string and the separator before the signature field).
///
/// # Errors
///
/// Returns [`ReceiptError`] if either marker is missing or the computed
/// bounds do not describe a valid slice.
pub fn extract_receipt_json(raw: &str) -> Result<String, ReceiptError> {
    let stripped: String = raw.chars().filter(|c| *c != '\\').collect();

    let order_at = stripped
        .find("orderId")
        .ok_or(ReceiptError::MissingMarker("orderId"))?;
    let signature_at = stripped
        .find("signature")
        .ok_or(ReceiptError::MissingMarker("signature"))?;

    let start = order_at.checked_sub(2).ok_or(ReceiptError::MalformedEnvelope)?;
    let end = signature_at
        .checked_sub(3)
        .filter(|end| *end > start)
        .ok_or(ReceiptError::MalformedEnvelope)?;

    stripped
        .get(start..end)
        .map(str::to_owned)
        .ok_or(ReceiptError::MalformedEnvelope)
}
