//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default nameserver, timeouts, known DKIM selectors, limits)
//! - CLI option types and parsing
//! - The library-level [`Config`] used by [`crate::run_audit`]

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt, OutputFormat};
