//! Error type definitions.
//!
//! This module defines the error types used throughout the application and the
//! probe kinds used to attribute failures.

use std::net::SocketAddr;
use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured DNS server is not an IP address (with optional port).
    #[error("Invalid DNS server address '{0}': expected IP or IP:port")]
    DnsServerError(String),

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Category of a failed DNS query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsErrorKind {
    /// The name does not exist (NXDOMAIN)
    NxDomain,
    /// The name exists but has no records of the requested type
    NoRecords,
    /// No answer within the configured timeout
    Timeout,
    /// The server reported a failure (SERVFAIL)
    ServFail,
    /// The server refused the query
    Refused,
    /// Anything else (malformed answer, connection error, ...)
    Other,
}

/// A single DNS query that did not produce records.
///
/// Displays as the underlying resolver message, which is suitable for direct
/// display next to the record it concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct DnsLookupError {
    /// Categorized failure kind
    pub kind: DnsErrorKind,
    /// Sanitized resolver message
    pub message: String,
}

impl DnsLookupError {
    pub fn new(kind: DnsErrorKind, message: impl AsRef<str>) -> Self {
        Self {
            kind,
            message: sanitize_and_truncate_error_message(message.as_ref()),
        }
    }

    /// True for NXDOMAIN and empty answers, i.e. the record legitimately does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, DnsErrorKind::NxDomain | DnsErrorKind::NoRecords)
    }
}

/// Failure fetching the MTA-STS policy document.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum HttpFetchError {
    /// The server answered with a non-2xx status (redirects included)
    #[error("HTTP status {0}")]
    Status(u16),
    /// The request timed out
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection or TLS setup failed
    #[error("connection failed: {0}")]
    Connect(String),
    /// The body exceeded the policy size limit
    #[error("policy body too large ({0} bytes)")]
    BodyTooLarge(usize),
    /// Any other client error
    #[error("{0}")]
    Other(String),
}

/// Why a domain input was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRejection {
    #[error("empty domain name")]
    Empty,
    #[error("longer than 253 characters")]
    TooLong,
    #[error("a label is longer than 63 characters")]
    LabelTooLong,
    #[error("contains an empty label")]
    EmptyLabel,
    #[error("contains an invalid character")]
    InvalidCharacter,
    #[error("a label starts or ends with a hyphen")]
    HyphenBoundary,
    #[error("needs at least two labels")]
    SingleLabel,
    #[error("is an IP address, not a domain")]
    IpAddress,
}

/// A supplied domain name was empty or malformed and will not be probed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid domain '{input}': {reason}")]
pub struct InvalidDomainInput {
    /// The raw input as supplied
    pub input: String,
    /// Rejection reason
    pub reason: DomainRejection,
}

/// The configured nameserver is unusable: it failed the startup reachability
/// check, or its address could not be parsed.
///
/// Recovered by falling back to the default server; reported as a warning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("DNS server {server} is not usable ({reason}); using {fallback}")]
pub struct ResolverUnreachable {
    /// Server as configured
    pub server: String,
    /// Server used instead
    pub fallback: SocketAddr,
    /// Lookup failure of the control query, or the address parse error
    pub reason: String,
}

/// Error types for loading the domain list.
#[derive(Error, Debug)]
pub enum InputError {
    /// No usable domain was supplied at all.
    #[error("no domains supplied (pass domains as arguments or use --file)")]
    NoDomains,

    /// Reading the input file or stdin failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV input could not be parsed.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The CSV header has no domain column.
    #[error("CSV file {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },
}

/// Probes whose failures are counted in [`super::ProcessingStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Mx,
    Spf,
    Dmarc,
    DkimPresence,
    DkimSelector,
    MtaSts,
    MtaStsPolicy,
    TlsRpt,
    Bimi,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Mx => "MX lookup",
            ProbeKind::Spf => "SPF lookup",
            ProbeKind::Dmarc => "DMARC lookup",
            ProbeKind::DkimPresence => "DKIM namespace lookup",
            ProbeKind::DkimSelector => "DKIM selector lookup",
            ProbeKind::MtaSts => "MTA-STS lookup",
            ProbeKind::MtaStsPolicy => "MTA-STS policy fetch",
            ProbeKind::TlsRpt => "TLS-RPT lookup",
            ProbeKind::Bimi => "BIMI lookup",
        }
    }
}
