//! Common test utilities for playledger integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use playledger_core::Receipt;
use playledger_oracle::{OracleError, ReceiptOracle, VerifyResponse};
use playledger_service::{create_router, AppState, ServiceConfig};
use playledger_store::RocksStore;

/// Oracle stub with a canned answer, standing in for the Play API.
#[derive(Default)]
pub struct StubOracle {
    /// When set, every verification fails with this message.
    pub fail_with: Option<String>,
    /// When set, subscription responses carry a price change in this state.
    pub price_change_state: Option<i64>,
}

impl StubOracle {
    fn respond(&self) -> Result<VerifyResponse, OracleError> {
        if let Some(message) = &self.fail_with {
            return Err(OracleError::Api {
                status: 400,
                message: message.clone(),
            });
        }
        let body = match self.price_change_state {
            Some(state) => serde_json::json!({"priceChange": {"state": state}}),
            None => serde_json::json!({"purchaseState": 0}),
        };
        Ok(serde_json::from_value(body).expect("stub response"))
    }
}

#[async_trait]
impl ReceiptOracle for StubOracle {
    async fn verify_one_time(&self, _: &Receipt) -> Result<VerifyResponse, OracleError> {
        self.respond()
    }

    async fn verify_subscription(&self, _: &Receipt) -> Result<VerifyResponse, OracleError> {
        self.respond()
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and a permissive
    /// oracle stub.
    pub fn new() -> Self {
        Self::with_oracle(StubOracle::default())
    }

    /// Create a new test harness with a specific oracle stub.
    pub fn with_oracle(oracle: StubOracle) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            google_account: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::new(store), Arc::new(oracle), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrapped receipt payload the way the Unity client ships it.
pub fn wrapped_payload(product_id: &str, token: &str) -> String {
    format!(
        r#"{{"Payload":"{{\"json\":\"{{\\\"orderId\\\":\\\"GPA.100-200\\\",\\\"packageName\\\":\\\"com.example.game\\\",\\\"productId\\\":\\\"{product_id}\\\",\\\"purchaseToken\\\":\\\"{token}\\\"}}\",\"signature\":\"sig\"}}"}}"#
    )
}
