//! Per-domain report.

use serde::Serialize;

use crate::domain::DomainName;
use crate::error_handling::ProbeKind;
use crate::probe::{
    DkimPresenceResult, DkimSelectorResult, MtaStsResult, MxProbeResult, TxtProbeResult,
};

/// Everything learned about one domain.
///
/// Fields appear in probe order. Built once by
/// [`build_domain_report`](super::build_domain_report) and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    pub domain: DomainName,
    pub mx: MxProbeResult,
    pub spf: TxtProbeResult,
    pub dmarc: TxtProbeResult,
    pub dkim_presence: DkimPresenceResult,
    pub dkim_selectors: Vec<DkimSelectorResult>,
    pub mta_sts: MtaStsResult,
    pub tls_rpt: TxtProbeResult,
    pub bimi: TxtProbeResult,
}

impl DomainReport {
    /// Probes whose lookup or fetch failed, in probe order.
    ///
    /// A selector counts once per failed selector lookup.
    pub fn failed_probes(&self) -> Vec<ProbeKind> {
        let mut failed = Vec::new();
        if self.mx.outcome.is_failed() {
            failed.push(ProbeKind::Mx);
        }
        if self.spf.outcome.is_failed() {
            failed.push(ProbeKind::Spf);
        }
        if self.dmarc.outcome.is_failed() {
            failed.push(ProbeKind::Dmarc);
        }
        if self.dkim_presence.outcome.is_failed() {
            failed.push(ProbeKind::DkimPresence);
        }
        failed.extend(
            self.dkim_selectors
                .iter()
                .filter(|s| s.failure.is_some())
                .map(|_| ProbeKind::DkimSelector),
        );
        if self.mta_sts.record.outcome.is_failed() {
            failed.push(ProbeKind::MtaSts);
        }
        if self
            .mta_sts
            .policy
            .as_ref()
            .is_some_and(|policy| policy.error().is_some())
        {
            failed.push(ProbeKind::MtaStsPolicy);
        }
        if self.tls_rpt.outcome.is_failed() {
            failed.push(ProbeKind::TlsRpt);
        }
        if self.bimi.outcome.is_failed() {
            failed.push(ProbeKind::Bimi);
        }
        failed
    }

    /// True when every DNS-based field carries a lookup failure.
    pub fn all_lookups_failed(&self) -> bool {
        self.mx.outcome.is_failed()
            && self.spf.outcome.is_failed()
            && self.dmarc.outcome.is_failed()
            && self.dkim_presence.outcome.is_failed()
            && self.dkim_selectors.iter().all(|s| s.failure.is_some())
            && self.mta_sts.record.outcome.is_failed()
            && self.tls_rpt.outcome.is_failed()
            && self.bimi.outcome.is_failed()
    }
}
