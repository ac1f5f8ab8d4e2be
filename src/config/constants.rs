//! Configuration constants.
//!
//! This module defines the constants used throughout the application, including
//! the fallback nameserver, network timeouts, the known DKIM selector table and
//! size limits.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Nameserver used when none is configured, or when the configured one fails the
/// reachability check.
pub const DEFAULT_DNS_SERVER: &str = "8.8.8.8";

/// Standard DNS port, used when the configured server has no explicit port.
pub const DNS_PORT: u16 = 53;

/// [`DEFAULT_DNS_SERVER`] as a socket address.
pub const DEFAULT_DNS_SERVER_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), DNS_PORT);

/// Domain queried (A record) to confirm that a nameserver answers before any probe runs.
pub const CONTROL_DOMAIN: &str = "google.com";

// Network operation timeouts
/// DNS query timeout in seconds (single attempt per query, no retries)
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// HTTP timeout in seconds for the MTA-STS policy fetch
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Literal prefix identifying an SPF record among a domain's TXT strings.
///
/// The trailing space is significant: `v=spf1` alone (no mechanisms) or
/// `v=spf10` do not count.
pub const SPF_PREFIX: &str = "v=spf1 ";

/// Well-known DKIM selectors and the provider that typically publishes them.
///
/// Selector names are chosen by the sending provider and cannot be enumerated
/// through DNS, so this table only covers the most common hosted platforms.
pub const KNOWN_DKIM_SELECTORS: &[(&str, &str)] = &[
    ("selector1", "Microsoft 365"),
    ("selector2", "Microsoft 365"),
    ("k1", "Mailchimp"),
];

/// Default BIMI selector (`default._bimi.<domain>`).
pub const DEFAULT_BIMI_SELECTOR: &str = "default";

/// Well-known path of the MTA-STS policy document on `mta-sts.<domain>`.
pub const MTA_STS_POLICY_PATH: &str = "/.well-known/mta-sts.txt";

/// Maximum MTA-STS policy body size in bytes (64KB).
/// Larger bodies are rejected as a fetch failure.
pub const MAX_POLICY_BODY_SIZE: usize = 64 * 1024;

/// Maximum error message length kept in a report (500 chars).
/// Longer resolver/HTTP messages are truncated with a note about the original length.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

// Domain name limits (RFC 1035)
/// Maximum length of a full domain name
pub const MAX_DOMAIN_LENGTH: usize = 253;
/// Maximum length of a single label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Default CSV column holding the domain name in batch files.
pub const DEFAULT_CSV_COLUMN: &str = "Domain";
