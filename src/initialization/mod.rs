//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - DNS client (with the startup reachability check and fallback)
//! - HTTP client for the MTA-STS policy fetch
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::{
    init_resolver, select_configured_resolver, select_resolver, verify_resolver,
};
