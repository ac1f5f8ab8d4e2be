//! Domain name validation and normalization.
//!
//! Every domain audited passes through [`DomainName::parse`] first, so probes can
//! rely on a lowercase, dot-free-at-the-end, syntactically plausible host name.
//! Internationalized names are converted to their ASCII (punycode) form, which is
//! what DNS queries need.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};
use crate::error_handling::{DomainRejection, InvalidDomainInput};

/// A validated, normalized domain name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Validates and normalizes a raw domain string.
    ///
    /// Surrounding whitespace and a single trailing dot are removed, ASCII input is
    /// lowercased, and non-ASCII input is converted to punycode.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomainInput` if the input is empty, an IP address, too long,
    /// has fewer than two labels, or contains a malformed label.
    pub fn parse(input: &str) -> Result<Self, InvalidDomainInput> {
        let reject = |reason| InvalidDomainInput {
            input: input.to_string(),
            reason,
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(reject(DomainRejection::Empty));
        }
        if trimmed.parse::<IpAddr>().is_ok() {
            return Err(reject(DomainRejection::IpAddress));
        }

        let ascii = if trimmed.is_ascii() {
            trimmed.to_ascii_lowercase()
        } else {
            match url::Host::parse(trimmed) {
                Ok(url::Host::Domain(domain)) => domain,
                _ => return Err(reject(DomainRejection::InvalidCharacter)),
            }
        };

        if ascii.len() > MAX_DOMAIN_LENGTH {
            return Err(reject(DomainRejection::TooLong));
        }

        let labels: Vec<&str> = ascii.split('.').collect();
        for label in &labels {
            if label.is_empty() {
                return Err(reject(DomainRejection::EmptyLabel));
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(reject(DomainRejection::LabelTooLong));
            }
            if !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(reject(DomainRejection::InvalidCharacter));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(reject(DomainRejection::HyphenBoundary));
            }
        }
        if labels.len() < 2 {
            return Err(reject(DomainRejection::SingleLabel));
        }

        Ok(Self(ascii))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds `<prefix>.<domain>`, e.g. `_dmarc.example.com`.
    pub fn prefixed(&self, prefix: &str) -> String {
        format!("{prefix}.{}", self.0)
    }
}

impl FromStr for DomainName {
    type Err = InvalidDomainInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
