//! Oracle error types.

/// Errors that can occur while verifying a receipt with Google Play.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Google Play API rejected the request.
    #[error("Google Play API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// The OAuth2 token exchange failed.
    #[error("token exchange failed: {0}")]
    Token(String),

    /// JWT assertion signing failed.
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
