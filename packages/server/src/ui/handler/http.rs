//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use tilesync_shared::time::unix_millis_to_rfc3339;

use crate::{
    infrastructure::dto::{
        http::{ConnectionDto, PlayersDto},
        websocket::players_from_snapshot,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current participant table, in the same shape as `updatePlayers`
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<PlayersDto> {
    let snapshot = state.repository.snapshot().await;
    Json(PlayersDto {
        players: players_from_snapshot(&snapshot),
    })
}

/// Open connections, joined or not
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<Vec<ConnectionDto>> {
    let connections = state
        .hub
        .connections()
        .await
        .into_iter()
        .map(|(id, connected_at)| ConnectionDto {
            id: id.into_string(),
            connected_at: unix_millis_to_rfc3339(connected_at),
        })
        .collect();
    Json(connections)
}
