//! Nameserver selection state.

use std::net::{IpAddr, SocketAddr};

use serde::Serialize;

use crate::config::DNS_PORT;
use crate::error_handling::{InitializationError, ResolverUnreachable};

/// The nameserver every probe of the run queries.
///
/// Created once at startup by [`crate::initialization::init_resolver`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolverConfig {
    /// Server address in use
    pub server: SocketAddr,
    /// Whether the server answered the control query
    pub verified: bool,
    /// Set when the requested server failed the check and the default was used instead
    #[serde(skip)]
    pub fallback: Option<ResolverUnreachable>,
}

impl ResolverConfig {
    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Parses a nameserver given as `IP` or `IP:port` (IPv6 with port as `[IP]:port`).
///
/// # Errors
///
/// Returns `InitializationError::DnsServerError` if the input is neither form.
pub fn parse_dns_server(input: &str) -> Result<SocketAddr, InitializationError> {
    let trimmed = input.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Ok(addr);
    }
    trimmed
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| InitializationError::DnsServerError(input.to_string()))
}
