//! DNS resolution and record querying.
//!
//! This module provides the resolver seam used by every probe:
//! - [`DnsClient`]: the async lookup interface (A, MX, TXT, ANY)
//! - [`HickoryDnsClient`]: the production implementation bound to one nameserver
//! - [`ResolverConfig`]: the nameserver chosen at startup and whether it answered
//!
//! Lookups never retry; a failed query is returned as a [`DnsLookupError`] and the
//! calling probe decides whether that means "absent" or "failed".
//!
//! [`DnsLookupError`]: crate::error_handling::DnsLookupError

mod client;
mod records;
mod server;

// Re-export public API
pub use client::{DnsClient, HickoryDnsClient};
pub use records::MxRecord;
pub use server::{parse_dns_server, ResolverConfig};
