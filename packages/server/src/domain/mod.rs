//! Domain layer for the synchronization server.
//!
//! This module contains the participant model and the registry contract,
//! independent of data transfer objects (DTOs) and transport concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Participant, ParticipantSnapshot};
pub use error::ValueObjectError;
pub use factory::ConnectionIdFactory;
pub use repository::ParticipantRepository;
pub use value_object::{AnimationState, ConnectionId, Position};
