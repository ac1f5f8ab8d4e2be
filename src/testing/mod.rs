//! In-memory DNS and HTTP doubles.
//!
//! These implement [`DnsClient`] and [`PolicyFetcher`] without touching the
//! network, so probes, the report builder and the batch orchestrator can be
//! exercised deterministically. Every call is recorded.
//!
//! Unknown names answer with a `NoRecords` error, which is what a real resolver
//! returns for a name without records of the requested type.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dns::{DnsClient, MxRecord};
use crate::error_handling::{DnsErrorKind, DnsLookupError, HttpFetchError};
use crate::fetch::PolicyFetcher;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn key(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Query type recorded by [`MockDnsClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockQuery {
    A,
    Mx,
    Txt,
    Any,
}

/// Mock DNS client.
#[derive(Clone, Default)]
pub struct MockDnsClient {
    a_records: Arc<Mutex<HashMap<String, Vec<Ipv4Addr>>>>,
    mx_records: Arc<Mutex<HashMap<String, Vec<MxRecord>>>>,
    txt_records: Arc<Mutex<HashMap<String, Vec<String>>>>,
    other_records: Arc<Mutex<HashMap<String, usize>>>,
    failures: Arc<Mutex<HashMap<String, DnsLookupError>>>,
    zone_failures: Arc<Mutex<HashMap<String, DnsLookupError>>>,
    unreachable: bool,
    queries: Arc<Mutex<Vec<(MockQuery, String)>>>,
}

impl MockDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every query times out, like a nameserver that never answers.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn add_a(&self, name: &str, addresses: Vec<Ipv4Addr>) {
        lock(&self.a_records).insert(key(name), addresses);
    }

    pub fn add_mx(&self, name: &str, records: Vec<MxRecord>) {
        lock(&self.mx_records).insert(key(name), records);
    }

    pub fn add_txt(&self, name: &str, records: Vec<&str>) {
        let records = records.into_iter().map(str::to_string).collect();
        lock(&self.txt_records).insert(key(name), records);
    }

    /// Records of a type with no dedicated lookup (e.g. a DKIM key published as CNAME).
    /// Only visible to ANY queries.
    pub fn add_other(&self, name: &str, count: usize) {
        lock(&self.other_records).insert(key(name), count);
    }

    /// Makes every query for `name` fail with NXDOMAIN.
    pub fn set_nxdomain(&self, name: &str) {
        self.set_failure(
            name,
            DnsLookupError::new(
                DnsErrorKind::NxDomain,
                format!("no record found for {name}: NXDomain"),
            ),
        );
    }

    /// Makes every query for `name` fail with `error`.
    pub fn set_failure(&self, name: &str, error: DnsLookupError) {
        lock(&self.failures).insert(key(name), error);
    }

    /// Makes every query for `zone` and any name below it fail with `error`.
    pub fn fail_zone(&self, zone: &str, error: DnsLookupError) {
        lock(&self.zone_failures).insert(key(zone), error);
    }

    fn failure_for(&self, name: &str) -> Option<DnsLookupError> {
        if let Some(error) = lock(&self.failures).get(name) {
            return Some(error.clone());
        }
        lock(&self.zone_failures)
            .iter()
            .find(|(zone, _)| name == zone.as_str() || name.ends_with(&format!(".{zone}")))
            .map(|(_, error)| error.clone())
    }

    /// All queries received so far, in order.
    pub fn queries(&self) -> Vec<(MockQuery, String)> {
        lock(&self.queries).clone()
    }

    pub fn query_count(&self) -> usize {
        lock(&self.queries).len()
    }

    fn answer<T: Clone>(
        &self,
        query: MockQuery,
        name: &str,
        records: &Mutex<HashMap<String, T>>,
    ) -> Result<T, DnsLookupError> {
        let name = key(name);
        lock(&self.queries).push((query, name.clone()));
        if self.unreachable {
            return Err(DnsLookupError::new(
                DnsErrorKind::Timeout,
                "request timed out",
            ));
        }
        if let Some(error) = self.failure_for(&name) {
            return Err(error);
        }
        lock(records).get(&name).cloned().ok_or_else(|| {
            DnsLookupError::new(
                DnsErrorKind::NoRecords,
                format!("no records found for {name}"),
            )
        })
    }
}

impl DnsClient for MockDnsClient {
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
        self.answer(MockQuery::A, name, &self.a_records)
    }

    async fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, DnsLookupError> {
        self.answer(MockQuery::Mx, name, &self.mx_records)
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsLookupError> {
        self.answer(MockQuery::Txt, name, &self.txt_records)
    }

    async fn lookup_any(&self, name: &str) -> Result<usize, DnsLookupError> {
        let other = self.answer(MockQuery::Any, name, &self.other_records);
        let name = key(name);
        let typed = lock(&self.a_records).get(&name).map_or(0, Vec::len)
            + lock(&self.mx_records).get(&name).map_or(0, Vec::len)
            + lock(&self.txt_records).get(&name).map_or(0, Vec::len);
        match other {
            Ok(count) => Ok(count + typed),
            Err(e) if e.kind == DnsErrorKind::NoRecords && typed > 0 => Ok(typed),
            Err(e) => Err(e),
        }
    }
}

/// Mock policy fetcher.
#[derive(Clone, Default)]
pub struct MockPolicyFetcher {
    responses: Arc<Mutex<HashMap<String, Result<String, HttpFetchError>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockPolicyFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_policy(&self, url: &str, body: &str) {
        lock(&self.responses).insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn add_failure(&self, url: &str, error: HttpFetchError) {
        lock(&self.responses).insert(url.to_string(), Err(error));
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl PolicyFetcher for MockPolicyFetcher {
    async fn fetch_policy(&self, url: &str) -> Result<String, HttpFetchError> {
        lock(&self.requests).push(url.to_string());
        lock(&self.responses)
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(HttpFetchError::Connect(format!("no route to {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_txt_and_unknown_names() {
        let client = MockDnsClient::new();
        client.add_txt("Example.com.", vec!["v=spf1 -all"]);

        let found = client.lookup_txt("example.com").await.unwrap();
        assert_eq!(found, vec!["v=spf1 -all".to_string()]);

        let missing = client.lookup_txt("other.example").await.unwrap_err();
        assert_eq!(missing.kind, DnsErrorKind::NoRecords);
        assert_eq!(client.query_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_any_counts_typed_records() {
        let client = MockDnsClient::new();
        client.add_txt("k1._domainkey.example.com", vec!["v=DKIM1; p=abc"]);
        client.add_other("selector1._domainkey.example.com", 1);

        assert_eq!(
            client.lookup_any("k1._domainkey.example.com").await.unwrap(),
            1
        );
        assert_eq!(
            client
                .lookup_any("selector1._domainkey.example.com")
                .await
                .unwrap(),
            1
        );
        assert!(client
            .lookup_any("selector2._domainkey.example.com")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_mock_zone_failure_covers_subdomains() {
        let client = MockDnsClient::new();
        client.add_txt("_dmarc.broken.example", vec!["v=DMARC1; p=none"]);
        client.fail_zone(
            "broken.example",
            DnsLookupError::new(DnsErrorKind::ServFail, "SERVFAIL"),
        );
        let err = client.lookup_txt("_dmarc.broken.example").await.unwrap_err();
        assert_eq!(err.kind, DnsErrorKind::ServFail);
        assert!(client.lookup_txt("notbroken.example").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_unreachable_times_out() {
        let client = MockDnsClient::unreachable();
        client.add_txt("example.com", vec!["v=spf1 -all"]);
        let err = client.lookup_txt("example.com").await.unwrap_err();
        assert_eq!(err.kind, DnsErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_mock_fetcher_records_requests() {
        let fetcher = MockPolicyFetcher::new();
        fetcher.add_policy("https://mta-sts.example.com/.well-known/mta-sts.txt", "version: STSv1");
        assert!(fetcher
            .fetch_policy("https://mta-sts.example.com/.well-known/mta-sts.txt")
            .await
            .is_ok());
        assert!(fetcher.fetch_policy("https://mta-sts.other.example/x").await.is_err());
        assert_eq!(fetcher.request_count(), 2);
    }
}
