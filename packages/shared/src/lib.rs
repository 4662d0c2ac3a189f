//! Shared utilities for Tilesync binaries and tests.

pub mod logger;
pub mod time;
