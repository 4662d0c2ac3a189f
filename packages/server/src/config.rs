//! Server configuration.
//!
//! Every option can be given as a command-line flag or an environment
//! variable; flags win.

use std::{num::NonZeroUsize, time::Duration};

use clap::Parser;

/// Default per-connection outbound queue depth
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => panic!("queue capacity must be non-zero"),
};

/// Default maximum inbound WebSocket message size in bytes
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "tilesync-server",
    version,
    about = "Position synchronization server for a shared virtual space"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TILESYNC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Messages queued for one client before it is treated as a slow consumer and disconnected
    #[arg(
        long,
        env = "TILESYNC_OUTBOUND_QUEUE_CAPACITY",
        default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY
    )]
    pub outbound_queue_capacity: NonZeroUsize,

    /// Close connections that send nothing for this many seconds (0 disables)
    #[arg(long, env = "TILESYNC_IDLE_TIMEOUT_SECS", default_value_t = 0)]
    pub idle_timeout_secs: u64,

    /// Maximum inbound WebSocket message size in bytes
    #[arg(long, env = "TILESYNC_MAX_MESSAGE_BYTES", default_value_t = DEFAULT_MAX_MESSAGE_BYTES)]
    pub max_message_bytes: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "TILESYNC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
            idle_timeout_secs: 0,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定の値
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.outbound_queue_capacity.get(), 64);
        assert_eq!(config.idle_timeout(), None);
        assert_eq!(config.max_message_bytes, DEFAULT_MAX_MESSAGE_BYTES);
    }

    #[test]
    fn test_parsed_defaults_match_default_impl() {
        // テスト項目: 引数なしで解析した設定は Default と同じ値になる
        // when (操作):
        let parsed = ServerConfig::try_parse_from(["tilesync-server"]).unwrap();
        let default = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(parsed.outbound_queue_capacity, default.outbound_queue_capacity);
        assert_eq!(parsed.idle_timeout_secs, default.idle_timeout_secs);
        assert_eq!(parsed.max_message_bytes, default.max_message_bytes);
        assert_eq!(parsed.log_level, default.log_level);
    }

    #[test]
    fn test_parse_flags() {
        // テスト項目: コマンドライン引数で設定を上書きできる
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "tilesync-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--outbound-queue-capacity",
            "8",
            "--idle-timeout-secs",
            "30",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.outbound_queue_capacity.get(), 8);
        assert_eq!(config.idle_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_rejects_zero_queue_capacity() {
        // テスト項目: 送信キュー容量 0 は拒否される
        let result = ServerConfig::try_parse_from([
            "tilesync-server",
            "--outbound-queue-capacity",
            "0",
        ]);

        assert!(result.is_err());
    }
}
