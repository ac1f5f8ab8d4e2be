//! MX probe.

use log::debug;

use crate::dns::DnsClient;
use crate::domain::DomainName;

use super::types::{MxProbeResult, RecordOutcome};

/// Queries the MX records of `domain`.
///
/// Records are kept in resolver order. Any lookup error, NXDOMAIN included, is
/// reported as `Failed`; only an empty successful answer is `Absent`.
pub async fn probe_mx<C: DnsClient>(dns: &C, domain: &DomainName) -> MxProbeResult {
    let name = domain.as_str().to_string();
    let outcome = match dns.lookup_mx(&name).await {
        Ok(records) if records.is_empty() => RecordOutcome::Absent,
        Ok(records) => {
            debug!("{} MX records for {name}", records.len());
            RecordOutcome::Found(records)
        }
        Err(e) => RecordOutcome::Failed(e),
    };
    MxProbeResult { name, outcome }
}
