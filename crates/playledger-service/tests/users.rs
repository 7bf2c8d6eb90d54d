//! Player registration and game-data integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn register_succeeds() {
    let harness = TestHarness::new();

    let response = harness.server.post("/v1/users/player-1/register").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn game_data_round_trip() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/v1/users/player-1/register")
        .await
        .assert_status_ok();

    harness
        .server
        .post("/v1/users/player-1/game-data")
        .json(&json!({"gameData": "{\"level\":7}"}))
        .await
        .assert_status_ok();

    let response = harness.server.get("/v1/users/player-1/game-data").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["payload"], "{\"level\":7}");
}

#[tokio::test]
async fn register_after_save_preserves_game_data() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/v1/users/player-1/game-data")
        .json(&json!({"gameData": "blob"}))
        .await
        .assert_status_ok();

    harness
        .server
        .post("/v1/users/player-1/register")
        .await
        .assert_status_ok();

    let response = harness.server.get("/v1/users/player-1/game-data").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["payload"], "blob");
}

#[tokio::test]
async fn get_game_data_for_unknown_player_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/users/ghost/game-data").await;

    // Domain rejection: HTTP 200, failure in the body.
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User is not registered in the database");
    assert!(body.get("payload").is_none());
}

#[tokio::test]
async fn registered_player_without_game_data_fails_with_same_message() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/v1/users/player-1/register")
        .await
        .assert_status_ok();

    let response = harness.server.get("/v1/users/player-1/game-data").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User is not registered in the database");
}
