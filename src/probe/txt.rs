//! TXT-based probes: SPF, DMARC, TLS-RPT and BIMI.
//!
//! SPF is looked up on the domain itself and filtered by prefix. The others live
//! under a fixed prefix label and report every TXT string verbatim; for them any
//! lookup error, a missing name included, is a failure.

use log::debug;

use crate::config::SPF_PREFIX;
use crate::dns::DnsClient;
use crate::domain::DomainName;

use super::types::{RecordOutcome, TxtProbeResult, TxtRecordKind};

/// Keeps the entries that are SPF records, verbatim.
///
/// The prefix match is exact and includes the trailing space, so `v=spf10` or a
/// bare `v=spf1` do not qualify.
pub fn extract_spf_records(txt: &[String]) -> Vec<String> {
    txt.iter()
        .filter(|record| record.starts_with(SPF_PREFIX))
        .cloned()
        .collect()
}

/// Queries TXT for `name` and reports all strings.
pub(crate) async fn probe_txt_at<C: DnsClient>(
    dns: &C,
    kind: TxtRecordKind,
    name: String,
) -> TxtProbeResult {
    let outcome = match dns.lookup_txt(&name).await {
        Ok(records) if records.is_empty() => RecordOutcome::Absent,
        Ok(records) => {
            debug!("{kind} record found at {name}");
            RecordOutcome::Found(records)
        }
        Err(e) => RecordOutcome::Failed(e),
    };
    TxtProbeResult {
        kind,
        name,
        outcome,
    }
}

/// SPF: TXT entries of the domain starting with `v=spf1 `.
///
/// A missing name or an empty answer is `Absent`; other lookup errors are `Failed`.
pub async fn probe_spf<C: DnsClient>(dns: &C, domain: &DomainName) -> TxtProbeResult {
    let name = domain.as_str().to_string();
    let outcome = match dns.lookup_txt(&name).await {
        Ok(records) => {
            let spf = extract_spf_records(&records);
            if spf.is_empty() {
                RecordOutcome::Absent
            } else {
                RecordOutcome::Found(spf)
            }
        }
        Err(e) if e.is_not_found() => RecordOutcome::Absent,
        Err(e) => RecordOutcome::Failed(e),
    };
    TxtProbeResult {
        kind: TxtRecordKind::Spf,
        name,
        outcome,
    }
}

/// DMARC: TXT at `_dmarc.<domain>`.
pub async fn probe_dmarc<C: DnsClient>(dns: &C, domain: &DomainName) -> TxtProbeResult {
    probe_txt_at(dns, TxtRecordKind::Dmarc, domain.prefixed("_dmarc")).await
}

/// TLS-RPT: TXT at `_smtp._tls.<domain>`.
pub async fn probe_tls_rpt<C: DnsClient>(dns: &C, domain: &DomainName) -> TxtProbeResult {
    probe_txt_at(dns, TxtRecordKind::TlsRpt, domain.prefixed("_smtp._tls")).await
}

/// BIMI: TXT at `<selector>._bimi.<domain>`.
pub async fn probe_bimi<C: DnsClient>(
    dns: &C,
    domain: &DomainName,
    selector: &str,
) -> TxtProbeResult {
    let name = domain.prefixed(&format!("{selector}._bimi"));
    probe_txt_at(dns, TxtRecordKind::Bimi, name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{DnsErrorKind, DnsLookupError};
    use crate::testing::MockDnsClient;
    use proptest::prelude::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_spf_records_prefix_rules() {
        let txt = strings(&[
            "google-site-verification=abc",
            "v=spf1 include:_spf.example.com ~all",
            "v=spf10 -all",
            "v=spf1",
            "V=SPF1 -all",
            "v=spf1 -all",
        ]);
        assert_eq!(
            extract_spf_records(&txt),
            strings(&["v=spf1 include:_spf.example.com ~all", "v=spf1 -all"])
        );
    }

    proptest! {
        #[test]
        fn test_spf_records_always_have_prefix(entries in proptest::collection::vec(".{0,40}", 0..8)) {
            let spf = extract_spf_records(&entries);
            prop_assert!(spf.iter().all(|r| r.starts_with("v=spf1 ")));
            prop_assert_eq!(
                spf.len(),
                entries.iter().filter(|e| e.starts_with("v=spf1 ")).count()
            );
        }
    }

    #[tokio::test]
    async fn test_spf_found_absent_and_failed() {
        let dns = MockDnsClient::new();
        dns.add_txt("example.com", vec!["v=spf1 include:_spf.example.com ~all"]);
        dns.add_txt("nospf.example", vec!["some-verification=1"]);
        dns.set_nxdomain("gone.example");
        dns.set_failure(
            "broken.example",
            DnsLookupError::new(DnsErrorKind::ServFail, "SERVFAIL"),
        );

        let found = probe_spf(&dns, &DomainName::parse("example.com").unwrap()).await;
        assert_eq!(
            found.outcome,
            RecordOutcome::Found(strings(&["v=spf1 include:_spf.example.com ~all"]))
        );

        let absent = probe_spf(&dns, &DomainName::parse("nospf.example").unwrap()).await;
        assert_eq!(absent.outcome, RecordOutcome::Absent);

        let gone = probe_spf(&dns, &DomainName::parse("gone.example").unwrap()).await;
        assert_eq!(gone.outcome, RecordOutcome::Absent);

        let broken = probe_spf(&dns, &DomainName::parse("broken.example").unwrap()).await;
        assert!(broken.outcome.is_failed());
    }

    #[tokio::test]
    async fn test_dmarc_verbatim_and_missing_is_failure() {
        let dns = MockDnsClient::new();
        dns.add_txt("_dmarc.example.com", vec!["v=DMARC1; p=reject;"]);

        let found = probe_dmarc(&dns, &DomainName::parse("example.com").unwrap()).await;
        assert_eq!(found.name, "_dmarc.example.com");
        assert_eq!(found.outcome, RecordOutcome::Found(strings(&["v=DMARC1; p=reject;"])));

        let missing = probe_dmarc(&dns, &DomainName::parse("other.example").unwrap()).await;
        assert!(missing.outcome.is_failed());
    }

    #[tokio::test]
    async fn test_tls_rpt_and_bimi_names() {
        let dns = MockDnsClient::new();
        dns.add_txt("_smtp._tls.example.com", vec!["v=TLSRPTv1; rua=mailto:tls@example.com"]);
        dns.add_txt("brand._bimi.example.com", vec!["v=BIMI1; l=https://example.com/logo.svg"]);
        let domain = DomainName::parse("example.com").unwrap();

        let tls = probe_tls_rpt(&dns, &domain).await;
        assert_eq!(tls.kind, TxtRecordKind::TlsRpt);
        assert!(tls.outcome.is_found());

        let bimi = probe_bimi(&dns, &domain, "brand").await;
        assert_eq!(bimi.name, "brand._bimi.example.com");
        assert!(bimi.outcome.is_found());

        let default_bimi = probe_bimi(&dns, &domain, "default").await;
        assert!(default_bimi.outcome.is_failed());
    }
}
