//! Position synchronization server.
//!
//! Clients join with their initial position, report movement, and receive the
//! full participant table after every change.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tilesync-server -- --port 8080
//! ```

use clap::Parser;
use tilesync_server::ServerConfig;
use tilesync_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = tilesync_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
