//! DNS client trait and the hickory-backed implementation.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig as HickoryConfig, ResolverOpts};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use log::{debug, warn};

use crate::error_handling::{categorize_resolve_error, DnsLookupError};

use super::records::{mx_records_from_lookup, txt_strings_from_lookup, MxRecord};

/// Async DNS lookups used by the probes.
///
/// Implementations perform exactly one query per call. An empty answer may be
/// returned either as `Ok(vec![])` or as a `NoRecords` error; probes handle both.
pub trait DnsClient: Send + Sync {
    /// A records of `name`.
    fn lookup_a(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Ipv4Addr>, DnsLookupError>> + Send;

    /// MX records of `name`, in answer order.
    fn lookup_mx(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<MxRecord>, DnsLookupError>> + Send;

    /// TXT strings of `name`, one per record.
    fn lookup_txt(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<String>, DnsLookupError>> + Send;

    /// Number of records of any type answered for `name`.
    fn lookup_any(&self, name: &str) -> impl Future<Output = Result<usize, DnsLookupError>> + Send;
}

/// [`DnsClient`] backed by a hickory resolver that talks to a single nameserver.
///
/// System search domains and the hosts file are not consulted (`ndots = 0`),
/// and each query is attempted once.
#[derive(Clone)]
pub struct HickoryDnsClient {
    resolver: TokioAsyncResolver,
    server: SocketAddr,
}

impl HickoryDnsClient {
    /// Creates a client for `server` with the given per-query timeout.
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        let name_servers =
            NameServerConfigGroup::from_ips_clear(&[server.ip()], server.port(), true);
        let config = HickoryConfig::from_parts(None, Vec::new(), name_servers);

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.ndots = 0;
        opts.use_hosts_file = false;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            server,
        }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<hickory_resolver::lookup::Lookup, DnsLookupError> {
        debug!("{record_type} query for {name} via {}", self.server);
        self.resolver
            .lookup(name, record_type)
            .await
            .map_err(|e| {
                let error = categorize_resolve_error(&e);
                if error.is_not_found() {
                    debug!("{record_type} lookup for {name}: {error}");
                } else {
                    warn!("{record_type} lookup for {name} failed: {error}");
                }
                error
            })
    }
}

impl DnsClient for HickoryDnsClient {
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsLookupError> {
        let lookup = self.query(name, RecordType::A).await?;
        Ok(lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect())
    }

    async fn lookup_mx(&self, name: &str) -> Result<Vec<MxRecord>, DnsLookupError> {
        let lookup = self.query(name, RecordType::MX).await?;
        Ok(mx_records_from_lookup(&lookup))
    }

    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, DnsLookupError> {
        let lookup = self.query(name, RecordType::TXT).await?;
        Ok(txt_strings_from_lookup(&lookup))
    }

    async fn lookup_any(&self, name: &str) -> Result<usize, DnsLookupError> {
        let lookup = self.query(name, RecordType::ANY).await?;
        Ok(lookup.iter().count())
    }
}
