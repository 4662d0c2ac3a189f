//! WebSocket message DTOs for the synchronization protocol.
//!
//! Frames are JSON text, internally tagged by `type`. Inbound frames are
//! decoded and validated here, at the boundary; nothing past this module
//! sees an unvalidated payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AnimationState, Participant, ParticipantSnapshot, Position, ValueObjectError};

/// Rejected inbound frame
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, unknown `type`, missing or non-numeric fields
    #[error("malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed JSON carrying values the domain rejects
    #[error("invalid event payload: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// Event sent from client to server, as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    PlayerJoin {
        x: f64,
        y: f64,
        /// Informational only; the connection's own identity is the key
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Movement {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(
            rename = "animationState",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        animation_state: Option<String>,
    },
}

/// Validated inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Join {
        position: Position,
        claimed_id: Option<String>,
    },
    Move {
        position: Position,
        animation_state: Option<AnimationState>,
        claimed_id: Option<String>,
    },
}

impl InboundEvent {
    /// Decode and validate one text frame.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let event: ClientEvent = serde_json::from_str(text)?;
        Ok(Self::try_from(event)?)
    }

    /// Identity the client claimed in its payload, if any
    pub fn claimed_id(&self) -> Option<&str> {
        match self {
            Self::Join { claimed_id, .. } | Self::Move { claimed_id, .. } => claimed_id.as_deref(),
        }
    }
}

impl TryFrom<ClientEvent> for InboundEvent {
    type Error = ValueObjectError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        match event {
            ClientEvent::PlayerJoin { x, y, id } => Ok(Self::Join {
                position: Position::new(x, y)?,
                claimed_id: id,
            }),
            ClientEvent::Movement {
                x,
                y,
                id,
                animation_state,
            } => Ok(Self::Move {
                position: Position::new(x, y)?,
                animation_state: animation_state.map(AnimationState::new).transpose()?,
                claimed_id: id,
            }),
        }
    }
}

/// Wire representation of one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(
        rename = "animationState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_state: Option<String>,
}

impl From<&Participant> for PlayerState {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            x: participant.position.x(),
            y: participant.position.y(),
            animation_state: participant
                .animation_state
                .as_ref()
                .map(|state| state.as_str().to_string()),
        }
    }
}

/// Convert a snapshot into the `players` map sent on the wire
pub fn players_from_snapshot(snapshot: &ParticipantSnapshot) -> BTreeMap<String, PlayerState> {
    snapshot
        .iter()
        .map(|(id, participant)| (id.as_str().to_string(), PlayerState::from(participant)))
        .collect()
}

/// Event sent from server to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Sent once to a new connection with its assigned identity
    Connected { id: String },
    /// Full participant table, sent to every connection after each accepted mutation
    UpdatePlayers {
        players: BTreeMap<String, PlayerState>,
    },
}

impl ServerEvent {
    pub fn update_players(snapshot: &ParticipantSnapshot) -> Self {
        Self::UpdatePlayers {
            players: players_from_snapshot(snapshot),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
