//! Real-time position synchronization server for a shared virtual space.
//!
//! Every connected client reports its own position and motion state; the
//! server keeps the authoritative table of joined participants and sends the
//! whole table to every connection after each accepted change.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{run, serve};
