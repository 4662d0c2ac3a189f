//! Core domain models for the synchronization server.

use std::collections::BTreeMap;

use super::value_object::{AnimationState, ConnectionId, Position};

/// Immutable point-in-time copy of every joined participant, keyed by
/// connection identity.
pub type ParticipantSnapshot = BTreeMap<ConnectionId, Participant>;

/// Last-known state of one joined connection
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Participant identifier, always equal to its registry key
    pub id: ConnectionId,
    /// Last reported world-space position
    pub position: Position,
    /// Last reported motion tag; absent until the first movement report
    pub animation_state: Option<AnimationState>,
}

impl Participant {
    /// Create a participant as it looks right after joining
    pub fn joined(id: ConnectionId, position: Position) -> Self {
        Self {
            id,
            position,
            animation_state: None,
        }
    }

    /// Replace the mutable fields with a new movement report.
    ///
    /// Both fields are overwritten; a `None` animation state clears the
    /// previous tag. `id` is never touched.
    pub fn apply_movement(&mut self, position: Position, animation_state: Option<AnimationState>) {
        self.position = position;
        self.animation_state = animation_state;
    }
}
