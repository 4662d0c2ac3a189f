//! InMemory Repository 実装

mod participant;

pub use participant::InMemoryParticipantRepository;
