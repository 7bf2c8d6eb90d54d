//! Purchase verification and price-change handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use playledger_core::OperationResult;

use crate::state::AppState;

/// Verify a purchase receipt and record it.
///
/// The body is the raw wrapped receipt payload exactly as the game client
/// forwards it; no JSON framing is expected around it.
pub async fn verify_purchase(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    body: String,
) -> Json<OperationResult> {
    Json(state.ledger.verify_and_save(&user_id, &body).await)
}

/// Check whether the player's subscription has a pending price change.
pub async fn check_price_change(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<OperationResult> {
    Json(state.ledger.check_price_change(&user_id).await)
}
