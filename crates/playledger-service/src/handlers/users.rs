//! Player registration and game-data handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use playledger_core::OperationResult;

use crate::state::AppState;

/// Save game data request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameDataRequest {
    /// Opaque game state blob, serialized by the game client.
    pub game_data: String,
}

/// Register a player.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<OperationResult> {
    Json(state.ledger.register(&user_id).await)
}

/// Save a player's game data.
pub async fn save_game_data(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(body): Json<SaveGameDataRequest>,
) -> Json<OperationResult> {
    Json(state.ledger.save_game_data(&user_id, &body.game_data).await)
}

/// Read a player's game data.
pub async fn get_game_data(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<OperationResult> {
    Json(state.ledger.get_game_data(&user_id).await)
}
