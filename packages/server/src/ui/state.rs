//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::ParticipantRepository,
    infrastructure::repository::InMemoryParticipantRepository,
    ui::broadcast::ConnectionHub,
};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ParticipantRepository>,
    /// Outbound queues of every open connection, for broadcasting
    pub hub: ConnectionHub,
    pub config: ServerConfig,
}

impl AppState {
    /// State backed by a fresh in-memory registry
    pub fn new(config: ServerConfig) -> Self {
        Self::with_repository(config, Arc::new(InMemoryParticipantRepository::new()))
    }

    pub fn with_repository(
        config: ServerConfig,
        repository: Arc<dyn ParticipantRepository>,
    ) -> Self {
        Self {
            repository,
            hub: ConnectionHub::new(config.outbound_queue_capacity.get()),
            config,
        }
    }
}
