//! Logging setup.

use tracing_subscriber::{
    EnvFilter,
    fmt::{format::Writer, time::FormatTime},
};

/// Local wall-clock timer for log lines, millisecond precision.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Build the default filter directive for a binary.
///
/// Binary names use `-`, tracing targets use `_`, so `tilesync-server` becomes
/// `tilesync_server=<level>`.
pub fn default_directive(bin_name: &str, level: &str) -> String {
    format!(
        "{}={level},tower_http={level}",
        bin_name.replace('-', "_")
    )
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Returns `false` if a
/// global subscriber was already installed, in which case it is kept.
pub fn setup_logger(bin_name: &str, default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTimer)
        .with_target(true)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Keeping existing tracing subscriber: {}", e);
            false
        }
    }
}
