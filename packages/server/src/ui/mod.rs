//! WebSocket synchronization server implementation.

pub mod broadcast;
pub mod error;
pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use error::ServerError;
pub use runner::{build_router, run, serve};
