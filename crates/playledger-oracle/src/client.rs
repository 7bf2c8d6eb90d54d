//! Google Play Developer API client implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;

use playledger_core::Receipt;

use crate::config::GoogleServiceAccount;
use crate::error::OracleError;
use crate::types::{GoogleErrorResponse, TokenResponse, VerifyResponse};
use crate::ReceiptOracle;

/// Google Play Developer API client.
///
/// Authenticates with a service-account JWT assertion exchanged for an OAuth2
/// bearer token, which is cached until shortly before expiry.
pub struct PlayVerifier {
    client: Client,
    account: GoogleServiceAccount,
    encoding_key: EncodingKey,
    api_base: String,
    token_url: String,
    token: Mutex<Option<CachedToken>>,
}

/// A cached bearer token with its refresh deadline.
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// JWT-bearer grant claims.
#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl PlayVerifier {
    /// Play Developer API base URL.
    const API_BASE: &'static str = "https://androidpublisher.googleapis.com";

    /// OAuth2 token endpoint.
    const TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// OAuth2 scope for the Play Developer API.
    const SCOPE: &'static str = "https://www.googleapis.com/auth/androidpublisher";

    /// Requested assertion lifetime in seconds.
    const TOKEN_LIFETIME_SECS: i64 = 3600;

    /// Refresh the cached token this many seconds before it expires.
    const TOKEN_REFRESH_SLACK_SECS: u64 = 60;

    /// Create a verifier against the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential's private key is not a valid RSA
    /// PEM.
    pub fn new(account: GoogleServiceAccount) -> Result<Self, OracleError> {
        Self::with_endpoints(account, Self::API_BASE, Self::TOKEN_URL)
    }

    /// Create a verifier against custom endpoints (used in tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the credential's private key is not a valid RSA
    /// PEM.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    pub fn with_endpoints(
        account: GoogleServiceAccount,
        api_base: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self, OracleError> {
        let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            account,
            encoding_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            token: Mutex::new(None),
        })
    }

    /// Get a valid bearer token, exchanging a fresh JWT assertion if the
    /// cached one is missing or about to expire.
    async fn bearer_token(&self) -> Result<String, OracleError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.exchange_assertion().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    /// Perform the RFC 7523 JWT-bearer token exchange.
    async fn exchange_assertion(&self) -> Result<CachedToken, OracleError> {
        let iat = chrono::Utc::now().timestamp();

        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: Self::SCOPE,
            aud: &self.token_url,
            iat,
            exp: iat + Self::TOKEN_LIFETIME_SECS,
        };

        let assertion =
            jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Token(format!("HTTP {status}: {body}")));
        }

        let token: TokenResponse = response.json().await?;

        tracing::debug!(expires_in = token.expires_in, "Obtained Play API access token");

        let lifetime = token
            .expires_in
            .saturating_sub(Self::TOKEN_REFRESH_SLACK_SECS);
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }

    /// Call a `purchases.{products|subscriptions}.get` endpoint for the
    /// receipt.
    async fn verify(&self, resource: &str, receipt: &Receipt) -> Result<VerifyResponse, OracleError> {
        let token = self.bearer_token().await?;

        let url = format!(
            "{}/androidpublisher/v3/applications/{}/purchases/{}/{}/tokens/{}",
            self.api_base, receipt.package_name, resource, receipt.product_id, receipt.purchase_token
        );

        tracing::debug!(
            package_name = %receipt.package_name,
            product_id = %receipt.product_id,
            resource = %resource,
            "Verifying receipt with Play Developer API"
        );

        let response = self.client.get(url).bearer_auth(token).send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response(response: reqwest::Response) -> Result<VerifyResponse, OracleError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse the Google error envelope
        let error_body: Result<GoogleErrorResponse, _> = response.json().await;

        match error_body {
            Ok(google_error) => Err(OracleError::Api {
                status: status.as_u16(),
                message: google_error.error.message,
            }),
            Err(_) => Err(OracleError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
            }),
        }
    }
}

#[async_trait]
impl ReceiptOracle for PlayVerifier {
    async fn verify_one_time(&self, receipt: &Receipt) -> Result<VerifyResponse, OracleError> {
        self.verify("products", receipt).await
    }

    async fn verify_subscription(&self, receipt: &Receipt) -> Result<VerifyResponse, OracleError> {
        self.verify("subscriptions", receipt).await
    }
}
