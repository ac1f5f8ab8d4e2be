//! Run summary.

use std::fmt;
use std::net::SocketAddr;

use serde::Serialize;

use crate::report::DomainReport;

/// What a run did, returned by [`run_audit`](super::run_audit).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditSummary {
    /// Domains a report was produced for
    pub domains_audited: usize,
    /// Inputs rejected as invalid
    pub skipped_inputs: usize,
    /// Valid inputs dropped as repeats
    pub duplicate_inputs: usize,
    pub with_mx: usize,
    pub with_spf: usize,
    pub with_dmarc: usize,
    /// Domains with at least one DKIM selector found
    pub with_dkim_selector: usize,
    pub with_mta_sts: usize,
    /// Domains whose MTA-STS policy was fetched
    pub with_mta_sts_policy: usize,
    pub with_tls_rpt: usize,
    pub with_bimi: usize,
    /// Failed lookups and fetches across all domains
    pub failed_lookups: usize,
    /// Nameserver the probes used
    pub dns_server: Option<SocketAddr>,
    /// Whether the requested nameserver was replaced by the default one
    pub resolver_fell_back: bool,
    pub elapsed_seconds: f64,
}

impl AuditSummary {
    pub(crate) fn record(&mut self, report: &DomainReport) {
        self.domains_audited += 1;
        self.with_mx += usize::from(report.mx.outcome.is_found());
        self.with_spf += usize::from(report.spf.outcome.is_found());
        self.with_dmarc += usize::from(report.dmarc.outcome.is_found());
        self.with_dkim_selector += usize::from(report.dkim_selectors.iter().any(|s| s.found));
        self.with_mta_sts += usize::from(report.mta_sts.record.outcome.is_found());
        self.with_mta_sts_policy += usize::from(
            report
                .mta_sts
                .policy
                .as_ref()
                .is_some_and(|p| p.fields().is_some()),
        );
        self.with_tls_rpt += usize::from(report.tls_rpt.outcome.is_found());
        self.with_bimi += usize::from(report.bimi.outcome.is_found());
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Audited {} domain{} in {:.1}s: MX {}, SPF {}, DMARC {}, DKIM {}, MTA-STS {}, TLS-RPT {}, BIMI {}",
            self.domains_audited,
            if self.domains_audited == 1 { "" } else { "s" },
            self.elapsed_seconds,
            self.with_mx,
            self.with_spf,
            self.with_dmarc,
            self.with_dkim_selector,
            self.with_mta_sts,
            self.with_tls_rpt,
            self.with_bimi,
        )?;
        if self.failed_lookups > 0 {
            write!(f, "; {} failed lookups", self.failed_lookups)?;
        }
        if self.skipped_inputs > 0 {
            write!(f, "; {} invalid inputs skipped", self.skipped_inputs)?;
        }
        if self.resolver_fell_back {
            if let Some(server) = self.dns_server {
                write!(f, "; fell back to DNS server {server}")?;
            }
        }
        Ok(())
    }
}
