//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, purchases, users};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Players
/// - `POST /v1/users/{userId}/register` - Register a player
/// - `POST /v1/users/{userId}/game-data` - Save the player's game data
/// - `GET  /v1/users/{userId}/game-data` - Read the player's game data
///
/// ## Purchases
/// - `POST /v1/users/{userId}/purchases` - Verify and record a receipt
///   (raw wrapped payload as the request body)
/// - `GET  /v1/users/{userId}/subscription/price-change` - Check for a
///   pending subscription price change
///
/// Every ledger route answers HTTP 200 with an `OperationResult` body; the
/// outcome lives in the body's `success` flag, matching the wire contract
/// the game client consumes.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Players
        .route("/v1/users/:user_id/register", post(users::register))
        .route("/v1/users/:user_id/game-data", post(users::save_game_data))
        .route("/v1/users/:user_id/game-data", get(users::get_game_data))
        // Purchases
        .route("/v1/users/:user_id/purchases", post(purchases::verify_purchase))
        .route(
            "/v1/users/:user_id/subscription/price-change",
            get(purchases::check_price_change),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
