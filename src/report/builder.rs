//! Domain report builder.

use log::debug;

use crate::config::DEFAULT_BIMI_SELECTOR;
use crate::dns::{DnsClient, ResolverConfig};
use crate::domain::DomainName;
use crate::fetch::PolicyFetcher;
use crate::probe::{
    probe_bimi, probe_dkim_presence, probe_dkim_selectors, probe_dmarc, probe_mta_sts, probe_mx,
    probe_spf, probe_tls_rpt,
};

use super::types::DomainReport;

/// Caller-tunable probe parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Extra DKIM selector checked after the known ones
    pub custom_dkim_selector: Option<String>,
    /// BIMI selector label
    pub bimi_selector: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            custom_dkim_selector: None,
            bimi_selector: DEFAULT_BIMI_SELECTOR.to_string(),
        }
    }
}

/// Everything the probes need, passed explicitly.
pub struct AuditContext<C, F> {
    pub dns: C,
    pub fetcher: F,
    pub options: ProbeOptions,
    /// Nameserver the DNS client talks to
    pub resolver: ResolverConfig,
}

impl<C, F> AuditContext<C, F> {
    pub fn new(dns: C, fetcher: F, options: ProbeOptions, resolver: ResolverConfig) -> Self {
        Self {
            dns,
            fetcher,
            options,
            resolver,
        }
    }
}

/// Runs every probe for `domain` in the fixed order MX, SPF, DMARC, DKIM presence,
/// DKIM selectors, MTA-STS, TLS-RPT, BIMI.
///
/// A failing probe does not stop the ones after it.
pub async fn build_domain_report<C, F>(ctx: &AuditContext<C, F>, domain: DomainName) -> DomainReport
where
    C: DnsClient,
    F: PolicyFetcher,
{
    debug!("Auditing {domain} via {}", ctx.resolver.server);
    let dns = &ctx.dns;

    let mx = probe_mx(dns, &domain).await;
    let spf = probe_spf(dns, &domain).await;
    let dmarc = probe_dmarc(dns, &domain).await;
    let dkim_presence = probe_dkim_presence(dns, &domain).await;
    let dkim_selectors =
        probe_dkim_selectors(dns, &domain, ctx.options.custom_dkim_selector.as_deref()).await;
    let mta_sts = probe_mta_sts(dns, &ctx.fetcher, &domain).await;
    let tls_rpt = probe_tls_rpt(dns, &domain).await;
    let bimi = probe_bimi(dns, &domain, &ctx.options.bimi_selector).await;

    DomainReport {
        domain,
        mx,
        spf,
        dmarc,
        dkim_presence,
        dkim_selectors,
        mta_sts,
        tls_rpt,
        bimi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DNS_SERVER_ADDR;
    use crate::dns::MxRecord;
    use crate::error_handling::ProbeKind;
    use crate::probe::RecordOutcome;
    use crate::testing::{MockDnsClient, MockPolicyFetcher, MockQuery};

    fn context(dns: MockDnsClient, options: ProbeOptions) -> AuditContext<MockDnsClient, MockPolicyFetcher> {
        AuditContext::new(
            dns,
            MockPolicyFetcher::new(),
            options,
            ResolverConfig {
                server: DEFAULT_DNS_SERVER_ADDR,
                verified: true,
                fallback: None,
            },
        )
    }

    #[tokio::test]
    async fn test_probe_order() {
        let dns = MockDnsClient::new();
        let ctx = context(dns.clone(), ProbeOptions::default());
        build_domain_report(&ctx, DomainName::parse("example.com").unwrap()).await;

        let names: Vec<(MockQuery, String)> = dns.queries();
        let expected = vec![
            (MockQuery::Mx, "example.com"),
            (MockQuery::Txt, "example.com"),
            (MockQuery::Txt, "_dmarc.example.com"),
            (MockQuery::Any, "_domainkey.example.com"),
            (MockQuery::Any, "selector1._domainkey.example.com"),
            (MockQuery::Any, "selector2._domainkey.example.com"),
            (MockQuery::Any, "k1._domainkey.example.com"),
            (MockQuery::Txt, "_mta-sts.example.com"),
            (MockQuery::Txt, "_smtp._tls.example.com"),
            (MockQuery::Txt, "default._bimi.example.com"),
        ];
        let expected: Vec<(MockQuery, String)> = expected
            .into_iter()
            .map(|(q, n)| (q, n.to_string()))
            .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_options_are_applied() {
        let dns = MockDnsClient::new();
        dns.add_txt("brand._bimi.example.com", vec!["v=BIMI1; l=https://example.com/l.svg"]);
        let options = ProbeOptions {
            custom_dkim_selector: Some("mykey".to_string()),
            bimi_selector: "brand".to_string(),
        };
        let ctx = context(dns, options);

        let report = build_domain_report(&ctx, DomainName::parse("example.com").unwrap()).await;
        assert_eq!(report.dkim_selectors.len(), 4);
        assert_eq!(report.dkim_selectors[3].selector, "mykey");
        assert!(report.bimi.outcome.is_found());
    }

    #[tokio::test]
    async fn test_failed_probes_listed() {
        let dns = MockDnsClient::new();
        dns.add_mx("example.com", vec![MxRecord::new("mx1.example.com", 10, 60)]);
        dns.add_txt("example.com", vec!["v=spf1 -all"]);
        let ctx = context(dns, ProbeOptions::default());

        let report = build_domain_report(&ctx, DomainName::parse("example.com").unwrap()).await;
        assert!(report.spf.outcome.is_found());
        assert_eq!(report.mx.count(), 1);
        // Missing names fail for the prefixed TXT records; SPF and selectors do not count
        assert_eq!(
            report.failed_probes(),
            vec![
                ProbeKind::Dmarc,
                ProbeKind::DkimPresence,
                ProbeKind::MtaSts,
                ProbeKind::TlsRpt,
                ProbeKind::Bimi
            ]
        );
        assert!(!report.all_lookups_failed());
        assert_eq!(report.dkim_presence.outcome.error().map(|e| e.is_not_found()), Some(true));
        assert_ne!(report.spf.outcome, RecordOutcome::Absent);
    }
}
