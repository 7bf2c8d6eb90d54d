//! Service configuration.

use std::path::Path;

use playledger_oracle::GoogleServiceAccount;

/// Service configuration loaded from environment variables and secrets
/// files.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/playledger").
    pub data_dir: String,

    /// Google Play service-account credential, if configured.
    pub google_account: Option<GoogleServiceAccount>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/playledger".into()),
            google_account: load_google_account(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/playledger".into(),
            google_account: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

/// Load the Google Play service-account key from a file or environment.
fn load_google_account() -> Option<GoogleServiceAccount> {
    // Try multiple paths for the key file
    let secret_paths = [
        ".secrets/google-play.json",
        "playledger/.secrets/google-play.json",
        "../.secrets/google-play.json",
    ];

    for path in &secret_paths {
        if Path::new(path).exists() {
            match GoogleServiceAccount::from_file(path) {
                Ok(account) => {
                    tracing::info!(path = %path, "Loaded Google Play service account from file");
                    return Some(account);
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "Skipping unreadable service-account file");
                }
            }
        }
    }

    // Fall back to environment variables
    tracing::debug!("Service-account file not found, using environment variables");
    let client_email = std::env::var("GOOGLE_CLIENT_EMAIL").ok()?;
    let private_key = std::env::var("GOOGLE_PRIVATE_KEY").ok()?;
    Some(GoogleServiceAccount {
        client_email,
        private_key,
    })
}
