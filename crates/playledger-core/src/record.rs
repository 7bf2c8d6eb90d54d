//! Persisted document shapes.
//!
//! Records are stored as plain JSON object maps so that unknown receipt
//! fields survive round-trips; these structs give the ledger typed access to
//! the fields it actually reads.

use serde::{Deserialize, Serialize};

use crate::receipt::Receipt;

/// A player's document in the `users` collection.
///
/// Written with merge semantics, so either field may be absent depending on
/// which operations have run for the player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Set to `true` on registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,

    /// Opaque game state blob, serialized by the game client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_data: Option<String>,
}

/// A committed purchase in the `purchases` collection, keyed by purchase
/// token.
///
/// This is the receipt passed through verbatim with the owning user stamped
/// on. At most one record may ever exist per purchase token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// The stamped owning user.
    pub user_id: String,

    /// The verified receipt, flattened into the record.
    #[serde(flatten)]
    pub receipt: Receipt,
}

impl PurchaseRecord {
    /// Stamp a verified receipt with its owning user.
    ///
    /// Clears any `userId` already inside the receipt so the stamped value is
    /// the only one serialized.
    #[must_use]
    pub fn stamp(user_id: impl Into<String>, mut receipt: Receipt) -> Self {
        receipt.user_id = None;
        Self {
            user_id: user_id.into(),
            receipt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_skips_absent_fields() {
        let record = UserRecord {
            registered: Some(true),
            game_data: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"registered":true}"#);
    }

    #[test]
    fn user_record_reads_partial_documents() {
        let record: UserRecord = serde_json::from_str(r#"{"gameData":"{\"level\":3}"}"#).unwrap();
        assert!(record.registered.is_none());
        assert_eq!(record.game_data.as_deref(), Some("{\"level\":3}"));
    }

    #[test]
    fn stamped_purchase_has_single_user_id() {
        let receipt: Receipt = serde_json::from_str(
            r#"{"orderId":"GPA.1","productId":"com.example.coins100","packageName":"com.example.game","purchaseToken":"tok-1","userId":"stale"}"#,
        )
        .unwrap();

        let record = PurchaseRecord::stamp("u1", receipt);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["userId"], "u1");
        assert_eq!(value["purchaseToken"], "tok-1");
        assert_eq!(value["orderId"], "GPA.1");
    }
}
