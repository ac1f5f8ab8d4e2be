//! MTA-STS probe: `_mta-sts` TXT record, then the HTTPS policy when advertised.

use log::debug;

use crate::dns::DnsClient;
use crate::domain::DomainName;
use crate::fetch::{mta_sts_policy_url, PolicyFetcher};

use super::policy::parse_policy;
use super::txt::probe_txt_at;
use super::types::{MtaStsPolicy, MtaStsResult, PolicyFetchOutcome, TxtRecordKind};

/// Queries `_mta-sts.<domain>` and fetches the policy only if the record was found.
pub async fn probe_mta_sts<C, F>(dns: &C, fetcher: &F, domain: &DomainName) -> MtaStsResult
where
    C: DnsClient,
    F: PolicyFetcher,
{
    let record = probe_txt_at(dns, TxtRecordKind::MtaSts, domain.prefixed("_mta-sts")).await;
    if !record.outcome.is_found() {
        return MtaStsResult {
            record,
            policy: None,
        };
    }

    let url = mta_sts_policy_url(domain);
    let fetch = match fetcher.fetch_policy(&url).await {
        Ok(body) => {
            let fields = parse_policy(&body);
            debug!("MTA-STS policy for {domain}: mode {:?}", fields.mode);
            PolicyFetchOutcome::Fetched { body, fields }
        }
        Err(error) => PolicyFetchOutcome::Failed { error },
    };

    MtaStsResult {
        record,
        policy: Some(MtaStsPolicy { url, fetch }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::HttpFetchError;
    use crate::testing::{MockDnsClient, MockPolicyFetcher};

    const POLICY_URL: &str = "https://mta-sts.example.com/.well-known/mta-sts.txt";

    #[tokio::test]
    async fn test_no_fetch_without_record() {
        let dns = MockDnsClient::new();
        let fetcher = MockPolicyFetcher::new();
        fetcher.add_policy(POLICY_URL, "version: STSv1\nmode: enforce\n");
        let domain = DomainName::parse("example.com").unwrap();

        let result = probe_mta_sts(&dns, &fetcher, &domain).await;
        assert!(result.record.outcome.is_failed());
        assert!(result.policy.is_none());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn test_no_fetch_with_empty_answer() {
        let dns = MockDnsClient::new();
        dns.add_txt("_mta-sts.example.com", Vec::new());
        let fetcher = MockPolicyFetcher::new();
        let domain = DomainName::parse("example.com").unwrap();

        let result = probe_mta_sts(&dns, &fetcher, &domain).await;
        assert!(result.policy.is_none());
        assert_eq!(fetcher.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_and_parse_policy() {
        let dns = MockDnsClient::new();
        dns.add_txt("_mta-sts.example.com", vec!["v=STSv1; id=20240101T000000;"]);
        let fetcher = MockPolicyFetcher::new();
        fetcher.add_policy(
            POLICY_URL,
            "version: STSv1\nmode: enforce\nmx: mx1.example.com\nmax_age: 86400\n",
        );
        let domain = DomainName::parse("example.com").unwrap();

        let result = probe_mta_sts(&dns, &fetcher, &domain).await;
        let policy = result.policy.unwrap();
        assert_eq!(policy.url, POLICY_URL);
        let fields = policy.fields().unwrap();
        assert_eq!(fields.mode.as_deref(), Some("enforce"));
        assert_eq!(fields.max_age, Some(86400));
        assert_eq!(fetcher.requests(), vec![POLICY_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recorded() {
        let dns = MockDnsClient::new();
        dns.add_txt("_mta-sts.example.com", vec!["v=STSv1; id=1;"]);
        let fetcher = MockPolicyFetcher::new();
        fetcher.add_failure(POLICY_URL, HttpFetchError::Status(404));
        let domain = DomainName::parse("example.com").unwrap();

        let result = probe_mta_sts(&dns, &fetcher, &domain).await;
        let policy = result.policy.unwrap();
        assert_eq!(policy.error(), Some(&HttpFetchError::Status(404)));
        assert!(policy.fields().is_none());
    }
}
