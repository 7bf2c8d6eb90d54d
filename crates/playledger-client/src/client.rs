//! Playledger HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use playledger_core::OperationResult;

use crate::error::ClientError;

/// Playledger API client.
///
/// Wraps the service's five operations. Every call resolves to an
/// [`OperationResult`]; the `success` flag in the body carries the outcome,
/// not the HTTP status.
#[derive(Debug, Clone)]
pub struct PlayledgerClient {
    client: Client,
    base_url: String,
}

/// Options for constructing a [`PlayledgerClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl PlayledgerClient {
    /// Create a new playledger client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the playledger service
    ///   (e.g., `"http://playledger:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new playledger client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers outside
    /// the wire contract.
    pub async fn register(&self, user_id: &str) -> Result<OperationResult, ClientError> {
        let url = format!("{}/v1/users/{user_id}/register", self.base_url);
        let response = self.client.post(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Save a player's opaque game-state blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers outside
    /// the wire contract.
    pub async fn save_game_data(
        &self,
        user_id: &str,
        game_data: &str,
    ) -> Result<OperationResult, ClientError> {
        let url = format!("{}/v1/users/{user_id}/game-data", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "gameData": game_data }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Read back a player's game-state blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers outside
    /// the wire contract.
    pub async fn get_game_data(&self, user_id: &str) -> Result<OperationResult, ClientError> {
        let url = format!("{}/v1/users/{user_id}/game-data", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Check whether the player's subscription has a pending price change.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers outside
    /// the wire contract.
    pub async fn check_price_change(&self, user_id: &str) -> Result<OperationResult, ClientError> {
        let url = format!(
            "{}/v1/users/{user_id}/subscription/price-change",
            self.base_url
        );
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Verify a wrapped receipt payload and record the purchase.
    ///
    /// `raw_payload` is forwarded untouched, exactly as the game client
    /// produced it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers outside
    /// the wire contract.
    pub async fn verify_purchase(
        &self,
        user_id: &str,
        raw_payload: &str,
    ) -> Result<OperationResult, ClientError> {
        let url = format!("{}/v1/users/{user_id}/purchases", self.base_url);

        tracing::debug!(user_id = %user_id, bytes = raw_payload.len(), "Forwarding receipt payload");

        let response = self
            .client
            .post(&url)
            .body(raw_payload.to_owned())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response(response: reqwest::Response) -> Result<OperationResult, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
