//! DKIM probes.
//!
//! Selectors cannot be enumerated, so DKIM is checked two ways: an ANY query on
//! the `_domainkey` node itself (many servers answer nothing there even when keys
//! exist, so this is only a hint), and existence checks on a short list of
//! selectors that common mail providers use.

use log::debug;

use crate::config::KNOWN_DKIM_SELECTORS;
use crate::dns::DnsClient;
use crate::domain::DomainName;

use super::types::{DkimPresenceResult, DkimSelectorResult, RecordOutcome};

/// ANY query for `_domainkey.<domain>`.
pub async fn probe_dkim_presence<C: DnsClient>(
    dns: &C,
    domain: &DomainName,
) -> DkimPresenceResult {
    let name = domain.prefixed("_domainkey");
    let outcome = match dns.lookup_any(&name).await {
        Ok(0) => RecordOutcome::Absent,
        Ok(count) => RecordOutcome::Found(count),
        Err(e) => RecordOutcome::Failed(e),
    };
    DkimPresenceResult { name, outcome }
}

/// Checks whether `<selector>._domainkey.<domain>` has any record.
///
/// A lookup error means not found. The error is kept for display unless it only
/// says the name does not exist.
pub async fn probe_dkim_selector<C: DnsClient>(
    dns: &C,
    domain: &DomainName,
    selector: &str,
    provider: Option<&str>,
) -> DkimSelectorResult {
    let name = domain.prefixed(&format!("{selector}._domainkey"));
    let (found, failure) = match dns.lookup_any(&name).await {
        Ok(count) => (count > 0, None),
        Err(e) if e.is_not_found() => (false, None),
        Err(e) => (false, Some(e)),
    };
    debug!("DKIM selector {selector} for {domain}: found={found}");
    DkimSelectorResult {
        selector: selector.to_string(),
        provider: provider.map(str::to_string),
        name,
        found,
        failure,
    }
}

/// Checks the known selectors in table order, then `custom` if given.
pub async fn probe_dkim_selectors<C: DnsClient>(
    dns: &C,
    domain: &DomainName,
    custom: Option<&str>,
) -> Vec<DkimSelectorResult> {
    let mut results = Vec::with_capacity(KNOWN_DKIM_SELECTORS.len() + 1);
    for (selector, provider) in KNOWN_DKIM_SELECTORS {
        results.push(probe_dkim_selector(dns, domain, selector, Some(*provider)).await);
    }
    if let Some(selector) = custom {
        results.push(probe_dkim_selector(dns, domain, selector, None).await);
    }
    results
}
