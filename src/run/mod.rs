//! Audit run: wires input, resolver, probes and output together.

mod summary;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::pin::pin;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::StreamExt;
use log::info;

use crate::batch::audit_domains;
use crate::config::Config;
use crate::dns::DnsClient;
use crate::domain::DomainName;
use crate::error_handling::ProcessingStats;
use crate::fetch::{HttpPolicyFetcher, PolicyFetcher};
use crate::initialization::{init_client, init_resolver};
use crate::input::load_domains;
use crate::output::{report_writer, ReportWriter};
use crate::report::{AuditContext, ProbeOptions};

pub use summary::AuditSummary;

/// Audits `domains` and writes every report as soon as it is built.
///
/// Failed probes are counted in `stats`. Resolver and input fields of the
/// returned summary are left for the caller to fill in.
///
/// # Errors
///
/// Returns an error only if writing a report fails.
pub async fn audit_to_writer<C, F>(
    ctx: &AuditContext<C, F>,
    domains: Vec<DomainName>,
    writer: &mut dyn ReportWriter,
    stats: &ProcessingStats,
) -> Result<AuditSummary>
where
    C: DnsClient,
    F: PolicyFetcher,
{
    let start = Instant::now();
    let mut summary = AuditSummary::default();

    let mut reports = pin!(audit_domains(ctx, domains));
    while let Some(report) = reports.next().await {
        for kind in report.failed_probes() {
            stats.increment_failure(kind);
        }
        summary.record(&report);
        writer.write_report(&report)?;
    }
    writer.finish()?;

    summary.failed_lookups = stats.total_failures();
    summary.elapsed_seconds = start.elapsed().as_secs_f64();
    Ok(summary)
}

fn log_failure_statistics(stats: &ProcessingStats) {
    let failures = stats.failures_by_kind();
    if failures.is_empty() {
        return;
    }
    info!("Lookup failures ({} total):", stats.total_failures());
    for (kind, count) in failures {
        info!("  {kind}: {count}");
    }
}

/// Runs a complete audit with the provided configuration.
///
/// Loads the domain list, selects a reachable nameserver, audits every domain in
/// order and writes the reports in the configured format.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no valid domain was
/// supplied, the HTTP client cannot be built, or the output cannot be written.
/// Individual lookup failures are part of the reports, not errors.
pub async fn run_audit(config: Config) -> Result<AuditSummary> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let input = load_domains(&config)
        .await
        .context("Failed to load domains")?;
    info!("Auditing {} domain(s)", input.domains.len());

    let (resolver, dns) = init_resolver(&config).await;
    let client = init_client(&config).context("Failed to initialize HTTP client")?;

    let options = ProbeOptions {
        custom_dkim_selector: config.dkim_selector.clone(),
        bimi_selector: config.bimi_selector.clone(),
    };
    let ctx = AuditContext::new(dns, HttpPolicyFetcher::new(client), options, resolver);

    let (out, color): (Box<dyn Write>, bool) = match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            (Box::new(BufWriter::new(file)), false)
        }
        None => (Box::new(io::stdout()), true),
    };
    let mut writer = report_writer(config.output_format, out, color);

    let stats = ProcessingStats::new();
    let mut summary = audit_to_writer(&ctx, input.domains, writer.as_mut(), &stats).await?;
    summary.skipped_inputs = input.rejected.len();
    summary.duplicate_inputs = input.duplicates;
    summary.dns_server = Some(ctx.resolver.server);
    summary.resolver_fell_back = ctx.resolver.fell_back();

    log_failure_statistics(&stats);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputFormat, DEFAULT_DNS_SERVER_ADDR};
    use crate::dns::{MxRecord, ResolverConfig};
    use crate::error_handling::{InputError, ProbeKind};
    use crate::testing::{MockDnsClient, MockPolicyFetcher};

    fn context(dns: MockDnsClient) -> AuditContext<MockDnsClient, MockPolicyFetcher> {
        AuditContext::new(
            dns,
            MockPolicyFetcher::new(),
            ProbeOptions::default(),
            ResolverConfig {
                server: DEFAULT_DNS_SERVER_ADDR,
                verified: true,
                fallback: None,
            },
        )
    }

    #[tokio::test]
    async fn test_audit_to_writer_counts() {
        let dns = MockDnsClient::new();
        dns.add_mx("example.com", vec![MxRecord::new("mx1.example.com", 10, 60)]);
        dns.add_txt("example.com", vec!["v=spf1 -all"]);
        dns.add_txt("_dmarc.example.com", vec!["v=DMARC1; p=none"]);
        let ctx = context(dns);
        let domains = vec![
            DomainName::parse("example.com").unwrap(),
            DomainName::parse("example.org").unwrap(),
        ];

        let file = tempfile::NamedTempFile::new().unwrap();
        let out = Box::new(file.reopen().unwrap());
        let mut writer = report_writer(OutputFormat::Json, out, false);
        let stats = ProcessingStats::new();
        let summary = audit_to_writer(&ctx, domains, writer.as_mut(), &stats)
            .await
            .unwrap();

        assert_eq!(summary.domains_audited, 2);
        assert_eq!(summary.with_mx, 1);
        assert_eq!(summary.with_spf, 1);
        assert_eq!(summary.with_dmarc, 1);
        assert_eq!(stats.get_failure_count(ProbeKind::Dmarc), 1);
        assert_eq!(stats.get_failure_count(ProbeKind::Mx), 1);
        assert_eq!(summary.failed_lookups, stats.total_failures());

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_run_audit_without_domains_fails() {
        let err = run_audit(Config::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::NoDomains)
        ));
    }

    #[tokio::test]
    async fn test_run_audit_rejects_invalid_config() {
        let config = Config {
            domains: vec!["example.com".to_string()],
            dns_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(run_audit(config).await.is_err());
    }
}
