//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    /// Coordinate is NaN or infinite
    #[error("Coordinate `{axis}` must be a finite number (got {value})")]
    CoordinateNotFinite { axis: &'static str, value: f64 },

    /// AnimationState validation error
    #[error("AnimationState cannot be empty")]
    AnimationStateEmpty,

    /// AnimationState too long error
    #[error("AnimationState cannot exceed {max} characters (got {actual})")]
    AnimationStateTooLong { max: usize, actual: usize },
}
