//! Shared utilities for votepool.

pub mod logging;

pub use logging::{init_logging, LogFormat};
