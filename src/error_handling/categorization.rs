//! Error categorization.
//!
//! This module maps resolver and HTTP client errors onto the typed kinds stored
//! in reports, keeping the original message for display.

use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;

use super::types::{DnsErrorKind, DnsLookupError, HttpFetchError};

/// Categorizes a resolver error into a [`DnsLookupError`].
///
/// Structured error kinds are used where hickory exposes them (negative answers
/// carry the response code); everything else falls back to matching the message.
pub fn categorize_resolve_error(error: &ResolveError) -> DnsLookupError {
    let message = error.to_string();
    let kind = match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain => DnsErrorKind::NxDomain,
            ResponseCode::ServFail => DnsErrorKind::ServFail,
            ResponseCode::Refused => DnsErrorKind::Refused,
            _ => DnsErrorKind::NoRecords,
        },
        ResolveErrorKind::Timeout => DnsErrorKind::Timeout,
        _ => categorize_dns_message(&message),
    };
    DnsLookupError::new(kind, message)
}

/// Categorizes a resolver error message.
///
/// Used for errors hickory only reports as text (proto and I/O errors).
pub fn categorize_dns_message(message: &str) -> DnsErrorKind {
    let msg = message.to_lowercase();
    if msg.contains("nxdomain") {
        DnsErrorKind::NxDomain
    } else if msg.contains("no records found") || msg.contains("no record found") {
        DnsErrorKind::NoRecords
    } else if msg.contains("timeout") || msg.contains("timed out") {
        DnsErrorKind::Timeout
    } else if msg.contains("servfail") || msg.contains("server failure") {
        DnsErrorKind::ServFail
    } else if msg.contains("connection refused") || msg.contains("os error") {
        // A refused socket is a transport error, not a REFUSED response code
        DnsErrorKind::Other
    } else if msg.contains("refused") {
        DnsErrorKind::Refused
    } else {
        DnsErrorKind::Other
    }
}

/// Categorizes a `reqwest::Error` from the policy fetch into an [`HttpFetchError`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> HttpFetchError {
    if let Some(status) = error.status() {
        return HttpFetchError::Status(status.as_u16());
    }

    let message = crate::utils::sanitize::sanitize_and_truncate_error_message(&error.to_string());
    if error.is_timeout() {
        HttpFetchError::Timeout(message)
    } else if error.is_connect() {
        HttpFetchError::Connect(message)
    } else {
        HttpFetchError::Other(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_dns_message() {
        assert_eq!(
            categorize_dns_message("Proto error: NXDomain"),
            DnsErrorKind::NxDomain
        );
        assert_eq!(
            categorize_dns_message("no records found for Query { name: Name(\"x.\") }"),
            DnsErrorKind::NoRecords
        );
        assert_eq!(
            categorize_dns_message("request timed out"),
            DnsErrorKind::Timeout
        );
        assert_eq!(
            categorize_dns_message("ServFail from upstream"),
            DnsErrorKind::ServFail
        );
        assert_eq!(
            categorize_dns_message("query refused by server"),
            DnsErrorKind::Refused
        );
        assert_eq!(
            categorize_dns_message("malformed label"),
            DnsErrorKind::Other
        );
    }

    #[test]
    fn test_connection_errors_are_not_refused_queries() {
        assert_eq!(
            categorize_dns_message("io error: Connection refused (os error 111)"),
            DnsErrorKind::Other
        );
        assert_eq!(
            categorize_dns_message("connection refused"),
            DnsErrorKind::Other
        );
        let error = ResolveError::from(ResolveErrorKind::Message("connection refused"));
        assert_eq!(categorize_resolve_error(&error).kind, DnsErrorKind::Other);
    }

    #[test]
    fn test_categorize_timeout_kind() {
        let error = ResolveError::from(ResolveErrorKind::Timeout);
        let categorized = categorize_resolve_error(&error);
        assert_eq!(categorized.kind, DnsErrorKind::Timeout);
        assert!(!categorized.message.is_empty());
    }

    #[test]
    fn test_categorize_message_kind() {
        let error = ResolveError::from(ResolveErrorKind::Message("request timed out"));
        assert_eq!(categorize_resolve_error(&error).kind, DnsErrorKind::Timeout);
    }
}
