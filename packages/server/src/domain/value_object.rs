//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::Serialize;
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a connection identifier, in characters
pub const CONNECTION_ID_MAX_LEN: usize = 100;

/// Maximum length of an animation state tag, in characters
pub const ANIMATION_STATE_MAX_LEN: usize = 64;

/// Connection identifier value object.
///
/// Assigned by the server when a transport session opens. Stable for the
/// lifetime of the connection and never reused after it closes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap an identifier handed out for a transport session.
    ///
    /// Fails if `id` is empty or longer than [`CONNECTION_ID_MAX_LEN`]
    /// characters. Server-generated UUIDs always pass.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        let len = id.chars().count();
        if len > CONNECTION_ID_MAX_LEN {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: CONNECTION_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World-space position value object.
///
/// Coordinates are unbounded but always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new Position, rejecting NaN and infinite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, ValueObjectError> {
        if !x.is_finite() {
            return Err(ValueObjectError::CoordinateNotFinite { axis: "x", value: x });
        }
        if !y.is_finite() {
            return Err(ValueObjectError::CoordinateNotFinite { axis: "y", value: y });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Animation state value object.
///
/// A symbolic motion tag reported by the client, e.g. `walk-left` or
/// `idle-down`. The server does not interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationState(String);

impl AnimationState {
    /// Create a new AnimationState.
    pub fn new(state: String) -> Result<Self, ValueObjectError> {
        if state.is_empty() {
            return Err(ValueObjectError::AnimationStateEmpty);
        }
        let len = state.chars().count();
        if len > ANIMATION_STATE_MAX_LEN {
            return Err(ValueObjectError::AnimationStateTooLong {
                max: ANIMATION_STATE_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(state))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
