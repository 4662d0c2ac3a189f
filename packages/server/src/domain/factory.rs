//! Identity assignment for new connections.

use super::{ConnectionId, error::ValueObjectError};

/// Hands out the identity a connection keeps until it closes.
///
/// Ids are random UUID v4 strings, so a reconnecting client always gets a
/// fresh identity and can never claim an old one.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// New random connection identity.
    ///
    /// Goes through [`ConnectionId::new`] validation like any other id; a
    /// UUID string is 36 characters, well inside the limit.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        ConnectionId::try_from(uuid.to_string())
    }
}
