//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, DNS lookup, HTTP fetch, input)
//! - Categorization of resolver and HTTP client errors into typed kinds
//! - Per-probe failure statistics
//!
//! Probe-level failures (`DnsLookupError`, `HttpFetchError`) are never raised past
//! the probe that hit them; they are stored in the report as data. Only
//! initialization and input errors reach the caller.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_dns_message, categorize_reqwest_error, categorize_resolve_error};
pub use stats::ProcessingStats;
pub use types::{
    DnsErrorKind, DnsLookupError, DomainRejection, HttpFetchError, InitializationError,
    InputError, InvalidDomainInput, ProbeKind, ResolverUnreachable,
};
