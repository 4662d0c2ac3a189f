//! HTTP API response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::websocket::PlayerState;

/// Current participant table for the players endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersDto {
    pub players: BTreeMap<String, PlayerState>,
}

/// Open connection for the connections endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub id: String,
    pub connected_at: String, // ISO 8601
}
