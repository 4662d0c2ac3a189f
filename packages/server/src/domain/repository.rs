//! Participant registry contract.
//!
//! The domain layer defines the trait; infrastructure provides the
//! implementation (dependency inversion). The registry is the single source
//! of truth for every currently-joined participant and knows nothing about
//! the transport.

use async_trait::async_trait;

use super::{AnimationState, ConnectionId, ParticipantSnapshot, Position};

/// Registry of joined participants.
///
/// Every operation is applied atomically with respect to `snapshot`, so a
/// reader never observes a partially-applied mutation. Implementations must
/// not perform I/O while holding their internal lock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a freshly joined participant unless `id` is already present.
    ///
    /// Returns `true` if an insertion occurred. A duplicate join is a silent
    /// no-op and leaves the existing entry untouched.
    async fn insert_if_absent(&self, id: ConnectionId, position: Position) -> bool;

    /// Replace position and animation state of an existing participant.
    ///
    /// Returns `true` if the entry existed. Movement for an unknown `id` is
    /// discarded; it never creates an entry.
    async fn update(
        &self,
        id: &ConnectionId,
        position: Position,
        animation_state: Option<AnimationState>,
    ) -> bool;

    /// Remove the participant for `id`. Returns `true` if it was present.
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// Point-in-time copy of the whole registry.
    async fn snapshot(&self) -> ParticipantSnapshot;

    /// Number of joined participants.
    async fn count(&self) -> usize;
}
