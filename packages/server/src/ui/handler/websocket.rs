//! WebSocket connection handlers.
//!
//! One connection moves through `Connected` (identity assigned) →
//! `Joined` (present in the registry) → `Closed`. Inbound frames are handled
//! strictly in arrival order. Whatever ends the connection, the cleanup path
//! removes it from the hub and the registry and broadcasts the result to
//! everyone still connected.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::{InboundEvent, ServerEvent},
    ui::{
        broadcast::{BroadcastReport, Registration},
        state::AppState,
    },
    usecase::{JoinParticipantUseCase, LeaveParticipantUseCase, MoveParticipantUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let max_message_bytes = state.config.max_message_bytes;
    Ok(ws
        .max_message_size(max_message_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

/// Which part of a connection ended it
enum Ended {
    Reader,
    Writer,
    ClosedByHub,
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (mut sender, mut receiver) = socket.split();

    // Register before anything else so this connection sees every broadcast
    // from here on, even before it joins.
    let Registration {
        queue: mut rx,
        mut closed,
    } = state.hub.register(connection_id.clone()).await;
    let connections = state.hub.connection_count().await;
    tracing::info!(connection_id = %connection_id, connections, "Client connected");

    let connected = ServerEvent::Connected {
        id: connection_id.as_str().to_string(),
    };
    match connected.to_json() {
        Ok(json) => {
            if !state.hub.send_to(&connection_id, json).await {
                tracing::warn!(connection_id = %connection_id, "Failed to queue connected event");
            }
        }
        Err(e) => tracing::error!("Failed to serialize connected event: {}", e),
    }

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let idle_timeout = state.config.idle_timeout();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        loop {
            let next = match idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, receiver.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        tracing::info!(
                            connection_id = %recv_connection_id,
                            "Idle timeout after {:?}, closing",
                            limit
                        );
                        break;
                    }
                },
                None => receiver.next().await,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::warn!(
                        connection_id = %recv_connection_id,
                        "WebSocket error: {}",
                        e
                    );
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(connection_id = %recv_connection_id, "Received text: {}", text.as_str());
                    dispatch_text(&recv_state, &recv_connection_id, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::debug!(
                        connection_id = %recv_connection_id,
                        "Ignoring binary frame"
                    );
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(connection_id = %recv_connection_id, "Client requested close");
                    break;
                }
            }
        }
    });

    // Spawn a task to forward queued events to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    // Whichever side ends first, stop the rest and wait until it has really
    // stopped, so no registry mutation can land after the cleanup below.
    // On eviction or shutdown both halves of the socket are dropped without
    // draining, since the peer may not be reading at all.
    let ended = tokio::select! {
        _ = &mut recv_task => Ended::Reader,
        _ = &mut send_task => Ended::Writer,
        _ = &mut closed => Ended::ClosedByHub,
    };
    match ended {
        Ended::Reader => {
            send_task.abort();
            let _ = send_task.await;
        }
        Ended::Writer => {
            recv_task.abort();
            let _ = recv_task.await;
        }
        Ended::ClosedByHub => {
            tracing::info!(connection_id = %connection_id, "Connection closed by server");
            recv_task.abort();
            send_task.abort();
            let _ = recv_task.await;
            let _ = send_task.await;
        }
    }

    disconnect(&state, &connection_id).await;
}

/// Decode one text frame and apply it.
///
/// Returns the broadcast report if the event changed shared state. Malformed
/// frames are logged and dropped; the connection stays open.
pub(crate) async fn dispatch_text(
    state: &AppState,
    connection_id: &ConnectionId,
    text: &str,
) -> Option<BroadcastReport> {
    let event = match InboundEvent::decode(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(connection_id = %connection_id, "Rejected inbound event: {}", e);
            return None;
        }
    };

    if let Some(claimed_id) = event.claimed_id()
        && claimed_id != connection_id.as_str()
    {
        tracing::debug!(
            connection_id = %connection_id,
            claimed_id = %claimed_id,
            "Payload id differs from connection identity; ignoring it"
        );
    }

    match event {
        InboundEvent::Join { position, .. } => {
            let usecase = JoinParticipantUseCase::new(state.repository.clone());
            let report = state
                .hub
                .broadcast_after(usecase.execute(connection_id.clone(), position))
                .await;
            match &report {
                Some(_) => tracing::info!(connection_id = %connection_id, "Joined at {}", position),
                None => tracing::debug!(connection_id = %connection_id, "Duplicate join ignored"),
            }
            report
        }
        InboundEvent::Move {
            position,
            animation_state,
            ..
        } => {
            let usecase = MoveParticipantUseCase::new(state.repository.clone());
            let report = state
                .hub
                .broadcast_after(usecase.execute(connection_id, position, animation_state))
                .await;
            if report.is_none() {
                tracing::debug!(connection_id = %connection_id, "Movement before join discarded");
            }
            report
        }
    }
}

/// Tear down a connection: stop delivering to it, drop its participant, and
/// tell everyone else.
///
/// Safe to call more than once; later calls find nothing to remove and
/// broadcast nothing.
pub(crate) async fn disconnect(
    state: &AppState,
    connection_id: &ConnectionId,
) -> Option<BroadcastReport> {
    state.hub.unregister(connection_id).await;

    let usecase = LeaveParticipantUseCase::new(state.repository.clone());
    let report = state
        .hub
        .broadcast_after(usecase.execute(connection_id))
        .await;

    let remaining_participants = usecase.count_remaining_participants().await;
    tracing::info!(
        connection_id = %connection_id,
        remaining_participants,
        "Client disconnected"
    );
    report
}
