//! The uniform operation result returned to the game client.

use serde::{Deserialize, Serialize};

/// Outcome of a single ledger operation, in the exact shape the game client
/// consumes.
///
/// Store failures, verifier failures, and domain rejections (duplicate token,
/// missing subscription, unregistered user) all share this representation;
/// callers can only tell them apart by the message text. Retry policy is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Human-readable outcome description. Empty on plain successes.
    #[serde(default)]
    pub message: String,

    /// Optional result payload (game data, product ID). Omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl OperationResult {
    /// A plain success with no message or payload.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            message: String::new(),
            payload: None,
        }
    }

    /// A success carrying a message.
    #[must_use]
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    /// A success carrying both a message and a payload.
    #[must_use]
    pub fn ok_payload(message: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload.into()),
        }
    }

    /// A failure carrying a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    /// The single translation point from collaborator errors to the wire
    /// contract: any displayable error becomes a failed result carrying its
    /// message.
    #[must_use]
    pub fn from_err(err: impl std::fmt::Display) -> Self {
        Self::failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_omitted_when_absent() {
        let json = serde_json::to_string(&OperationResult::ok_message("Save in database")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Save in database"}"#);
    }

    #[test]
    fn payload_present_when_set() {
        let json = serde_json::to_string(&OperationResult::ok_payload("", "data")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"","payload":"data"}"#);
    }

    #[test]
    fn deserializes_without_payload() {
        let result: OperationResult =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "nope");
        assert!(result.payload.is_none());
    }

    #[test]
    fn from_err_carries_display() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "store down");
        let result = OperationResult::from_err(err);
        assert!(!result.success);
        assert_eq!(result.message, "store down");
    }
}
