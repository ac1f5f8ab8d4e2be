//! Batch orchestration.
//!
//! Domains are audited strictly one after another: the next domain's probes only
//! start once the previous report has been yielded and the consumer asks for more.

use futures::stream::{self, Stream, StreamExt};
use log::info;

use crate::dns::DnsClient;
use crate::domain::DomainName;
use crate::fetch::PolicyFetcher;
use crate::report::{build_domain_report, AuditContext, DomainReport};

/// Lazily audits `domains` in order, yielding one report per domain.
///
/// Nothing is queried until the stream is polled. Each call returns a fresh
/// stream, so the same context can audit several lists.
pub fn audit_domains<'a, C, F>(
    ctx: &'a AuditContext<C, F>,
    domains: Vec<DomainName>,
) -> impl Stream<Item = DomainReport> + 'a
where
    C: DnsClient + 'a,
    F: PolicyFetcher + 'a,
{
    let total = domains.len();
    stream::iter(domains.into_iter().enumerate()).then(move |(index, domain)| {
        info!("[{}/{}] Auditing {domain}", index + 1, total);
        build_domain_report(ctx, domain)
    })
}

/// Audits every domain and collects the reports.
pub async fn audit_all<C, F>(ctx: &AuditContext<C, F>, domains: Vec<DomainName>) -> Vec<DomainReport>
where
    C: DnsClient,
    F: PolicyFetcher,
{
    audit_domains(ctx, domains).collect().await
}
