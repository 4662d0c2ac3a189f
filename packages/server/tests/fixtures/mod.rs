//! Shared fixtures for integration tests.
//!
//! Each test starts its own in-process server on an ephemeral port and
//! stops it when the fixture is dropped.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tilesync_server::ServerConfig;
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = tilesync_server::serve(listener, config, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Ask the server to shut down, as Ctrl-C would
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Ids of the currently joined participants, via `/api/players`
    pub async fn player_ids(&self) -> Vec<String> {
        let body: Value = reqwest::get(format!("{}/api/players", self.base_url()))
            .await
            .expect("Failed to request players")
            .json()
            .await
            .expect("Players body is JSON");
        body["players"]
            .as_object()
            .expect("players is an object")
            .keys()
            .cloned()
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A connected test client and the identity the server assigned to it
pub struct TestClient {
    pub id: String,
    pub ws: WsStream,
}

impl TestClient {
    /// Connect and consume the `connected` greeting
    pub async fn connect(server: &TestServer) -> Self {
        let (mut ws, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        let greeting = next_event(&mut ws).await;
        assert_eq!(greeting["type"], "connected");
        let id = greeting["id"]
            .as_str()
            .expect("connected event carries an id")
            .to_string();
        Self { id, ws }
    }

    pub async fn send_json(&mut self, value: Value) {
        self.ws
            .send(Message::text(value.to_string()))
            .await
            .expect("Failed to send");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(Message::text(text.to_string()))
            .await
            .expect("Failed to send");
    }

    pub async fn join(&mut self, x: f64, y: f64) {
        let id = self.id.clone();
        self.send_json(serde_json::json!({"type": "playerJoin", "x": x, "y": y, "id": id}))
            .await;
    }

    pub async fn move_to(&mut self, x: f64, y: f64, animation_state: &str) {
        let id = self.id.clone();
        self.send_json(serde_json::json!({
            "type": "movement",
            "x": x,
            "y": y,
            "id": id,
            "animationState": animation_state,
        }))
        .await;
    }

    /// Next `updatePlayers` payload's `players` map
    pub async fn next_players(&mut self) -> serde_json::Map<String, Value> {
        let event = next_event(&mut self.ws).await;
        assert_eq!(event["type"], "updatePlayers", "unexpected event: {event}");
        event["players"]
            .as_object()
            .expect("players is an object")
            .clone()
    }

    /// Assert nothing arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) {
        match tokio::time::timeout(wait, self.ws.next()).await {
            Err(_) => {}
            Ok(other) => panic!("expected no event, got {other:?}"),
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}

/// Wait until the server ends the connection, skipping anything still queued
pub async fn wait_for_close(ws: &mut WsStream, wait: Duration) -> bool {
    tokio::time::timeout(wait, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await
    .is_ok()
}

/// Next JSON text event, skipping control frames
pub async fn next_event(ws: &mut WsStream) -> Value {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for event")
            .expect("Stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("Event is JSON");
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}
