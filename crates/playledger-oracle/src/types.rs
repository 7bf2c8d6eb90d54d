//! Google Play API response types.

use serde::Deserialize;

/// `priceChange.state` value meaning a proposed price increase awaits user
/// acceptance.
pub const PRICE_CHANGE_PENDING: i64 = 0;

/// A purchase or subscription resource returned by the Play Developer API.
///
/// Only the price-change field is typed; the rest of the resource is carried
/// through for callers that want to inspect it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Pending or accepted price change, present on subscription resources
    /// the platform has proposed a new price for.
    #[serde(default)]
    pub price_change: Option<PriceChange>,

    /// Remaining resource fields, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VerifyResponse {
    /// Whether the platform reports a price change the user has not yet
    /// accepted.
    #[must_use]
    pub fn has_pending_price_change(&self) -> bool {
        self.price_change
            .as_ref()
            .is_some_and(|change| change.state == PRICE_CHANGE_PENDING)
    }
}

/// Subscription price-change details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    /// Price-change state: 0 = outstanding (pending), 1 = accepted.
    pub state: i64,

    /// Remaining fields (new price, currency).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorResponse {
    pub error: GoogleErrorBody,
}

/// Inner error body of a Google API error response.
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_price_change_detected() {
        let response: VerifyResponse = serde_json::from_str(
            r#"{"startTimeMillis":"123","priceChange":{"state":0,"newPrice":{"priceMicros":"990000","currency":"USD"}}}"#,
        )
        .unwrap();
        assert!(response.has_pending_price_change());
    }

    #[test]
    fn accepted_price_change_is_not_pending() {
        let response: VerifyResponse =
            serde_json::from_str(r#"{"priceChange":{"state":1}}"#).unwrap();
        assert!(!response.has_pending_price_change());
    }

    #[test]
    fn absent_price_change_is_not_pending() {
        let response: VerifyResponse =
            serde_json::from_str(r#"{"purchaseState":0,"kind":"androidpublisher#productPurchase"}"#)
                .unwrap();
        assert!(!response.has_pending_price_change());
        assert_eq!(response.extra["purchaseState"], 0);
    }
}
