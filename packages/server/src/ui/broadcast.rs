//! Broadcast fan-out to open connections.
//!
//! Every open connection owns a bounded outbound queue and a close signal.
//! The hub keeps the sending half of each and pushes serialized events into
//! the queue without awaiting network I/O, so a slow socket never stalls the
//! caller or other recipients. A connection whose queue is full is evicted:
//! its entry is dropped, which fires its close signal, and the connection
//! tears down its socket and runs its own cleanup.

use std::{collections::HashMap, future::Future};

use axum::extract::ws::Utf8Bytes;
use tokio::sync::{
    Mutex,
    mpsc::{self, error::TrySendError},
    oneshot,
};

use tilesync_shared::time::now_unix_millis;

use crate::{
    domain::{ConnectionId, ParticipantSnapshot},
    infrastructure::dto::websocket::ServerEvent,
};

/// Client connection information
pub struct ClientInfo {
    /// Outbound message queue
    pub sender: mpsc::Sender<Utf8Bytes>,
    /// Dropped (or fired) when the hub lets go of this connection
    pub close: oneshot::Sender<()>,
    /// Unix timestamp when connected (UTC, milliseconds)
    pub connected_at: i64,
}

/// Receiving side of a registered connection
pub struct Registration {
    /// Messages to write to the socket, in order
    pub queue: mpsc::Receiver<Utf8Bytes>,
    /// Resolves once the hub has evicted or closed this connection
    pub closed: oneshot::Receiver<()>,
}

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the message was queued for
    pub delivered: Vec<ConnectionId>,
    /// Connections dropped because their queue was full or closed
    pub evicted: Vec<ConnectionId>,
}

/// Set of open connections and their outbound queues
pub struct ConnectionHub {
    clients: Mutex<HashMap<ConnectionId, ClientInfo>>,
    queue_capacity: usize,
}

impl ConnectionHub {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Register an open connection.
    ///
    /// Registering an id twice replaces the previous entry, which closes it.
    pub async fn register(&self, connection_id: ConnectionId) -> Registration {
        let (sender, queue) = mpsc::channel(self.queue_capacity);
        let (close, closed) = oneshot::channel();
        let mut clients = self.clients.lock().await;
        clients.insert(
            connection_id,
            ClientInfo {
                sender,
                close,
                connected_at: now_unix_millis(),
            },
        );
        Registration { queue, closed }
    }

    /// Remove a connection. Returns `true` if it was registered.
    pub async fn unregister(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id).is_some()
    }

    /// Close every open connection, e.g. on server shutdown.
    ///
    /// Returns how many connections were closed.
    pub async fn close_all(&self) -> usize {
        let mut clients = self.clients.lock().await;
        let closed = clients.len();
        for (_, client) in clients.drain() {
            let _ = client.close.send(());
        }
        closed
    }

    /// Queue a message for a single connection.
    ///
    /// Returns `false` if the connection is unknown or its queue is full or
    /// closed. Does not evict.
    pub async fn send_to(&self, connection_id: &ConnectionId, message: String) -> bool {
        let clients = self.clients.lock().await;
        clients
            .get(connection_id)
            .is_some_and(|client| client.sender.try_send(message.into()).is_ok())
    }

    /// Run `mutation` and, if it yields a snapshot, send it to every open
    /// connection as `updatePlayers`.
    ///
    /// The hub lock is held from before the mutation until the fan-out is
    /// queued, so snapshots reach every queue in the order they were taken.
    /// Returns `None` when the mutation produced nothing to broadcast.
    pub async fn broadcast_after<F>(&self, mutation: F) -> Option<BroadcastReport>
    where
        F: Future<Output = Option<ParticipantSnapshot>>,
    {
        let mut clients = self.clients.lock().await;
        let snapshot = mutation.await?;

        match ServerEvent::update_players(&snapshot).to_json() {
            Ok(message) => Some(fan_out(&mut clients, Utf8Bytes::from(message))),
            Err(e) => {
                tracing::error!("Failed to serialize snapshot: {}", e);
                Some(BroadcastReport::default())
            }
        }
    }

    /// Number of open connections, joined or not
    pub async fn connection_count(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }

    /// Open connections with their connect time, sorted by id
    pub async fn connections(&self) -> Vec<(ConnectionId, i64)> {
        let clients = self.clients.lock().await;
        let mut connections: Vec<(ConnectionId, i64)> = clients
            .iter()
            .map(|(id, info)| (id.clone(), info.connected_at))
            .collect();
        connections.sort_by(|a, b| a.0.cmp(&b.0));
        connections
    }
}

/// Queue the same message for every client.
///
/// Per-recipient failures are isolated: a full or closed queue evicts that
/// recipient and delivery continues to the rest.
fn fan_out(
    clients: &mut HashMap<ConnectionId, ClientInfo>,
    message: Utf8Bytes,
) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for (connection_id, client) in clients.iter() {
        match client.sender.try_send(message.clone()) {
            Ok(()) => report.delivered.push(connection_id.clone()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    "Outbound queue full, disconnecting slow consumer"
                );
                report.evicted.push(connection_id.clone());
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Outbound queue closed, dropping connection"
                );
                report.evicted.push(connection_id.clone());
            }
        }
    }

    for connection_id in &report.evicted {
        if let Some(client) = clients.remove(connection_id) {
            let _ = client.close.send(());
        }
    }

    tracing::debug!(
        delivered = report.delivered.len(),
        evicted = report.evicted.len(),
        "Broadcast complete"
    );
    report
}
