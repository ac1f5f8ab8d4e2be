//! DNS resolver initialization.
//!
//! Before the first probe runs, the configured nameserver must answer a
//! known-good query (an A lookup of the control domain). A server that fails the
//! check, or whose address does not parse, is replaced by the default server and
//! a warning is surfaced; this is never fatal.

use std::net::SocketAddr;
use std::time::Duration;

use log::{info, warn};

use crate::config::{Config, DEFAULT_DNS_SERVER_ADDR};
use crate::dns::{parse_dns_server, DnsClient, HickoryDnsClient, ResolverConfig};
use crate::error_handling::{DnsErrorKind, DnsLookupError, ResolverUnreachable};

/// Checks that `client` answers an A query for `control_domain`.
///
/// # Errors
///
/// Returns the lookup failure, or a `NoRecords` error for an empty answer.
pub async fn verify_resolver<C: DnsClient>(
    client: &C,
    control_domain: &str,
) -> Result<(), DnsLookupError> {
    let addresses = client.lookup_a(control_domain).await?;
    if addresses.is_empty() {
        return Err(DnsLookupError::new(
            DnsErrorKind::NoRecords,
            format!("no A records returned for {control_domain}"),
        ));
    }
    Ok(())
}

/// Picks the nameserver for the run.
///
/// `build` creates a client for a server address. The requested server is used
/// when it passes [`verify_resolver`]; otherwise the default server is used and
/// the returned [`ResolverConfig`] carries a [`ResolverUnreachable`] warning. If
/// no server answers, the run still proceeds with `verified = false` and every
/// probe reports its own lookup failure.
pub async fn select_resolver<C, B>(
    requested: SocketAddr,
    control_domain: &str,
    build: B,
) -> (ResolverConfig, C)
where
    C: DnsClient,
    B: Fn(SocketAddr) -> C,
{
    let client = build(requested);
    let reason = match verify_resolver(&client, control_domain).await {
        Ok(()) => {
            info!("Using DNS server {requested}");
            let config = ResolverConfig {
                server: requested,
                verified: true,
                fallback: None,
            };
            return (config, client);
        }
        Err(e) => e,
    };

    if requested == DEFAULT_DNS_SERVER_ADDR {
        warn!("DNS server {requested} failed the reachability check ({reason}); lookups will likely fail");
        let config = ResolverConfig {
            server: requested,
            verified: false,
            fallback: None,
        };
        return (config, client);
    }

    let unreachable = ResolverUnreachable {
        server: requested.to_string(),
        fallback: DEFAULT_DNS_SERVER_ADDR,
        reason: reason.to_string(),
    };
    fall_back_to_default(unreachable, control_domain, &build).await
}

/// Like [`select_resolver`], for a server address as configured.
///
/// An address that is not `IP[:port]` (a host name, say) goes straight to the
/// default server with a [`ResolverUnreachable`] warning carrying the parse error.
pub async fn select_configured_resolver<C, B>(
    input: &str,
    control_domain: &str,
    build: B,
) -> (ResolverConfig, C)
where
    C: DnsClient,
    B: Fn(SocketAddr) -> C,
{
    match parse_dns_server(input) {
        Ok(requested) => select_resolver(requested, control_domain, build).await,
        Err(e) => {
            let unreachable = ResolverUnreachable {
                server: input.trim().to_string(),
                fallback: DEFAULT_DNS_SERVER_ADDR,
                reason: e.to_string(),
            };
            fall_back_to_default(unreachable, control_domain, &build).await
        }
    }
}

async fn fall_back_to_default<C, B>(
    unreachable: ResolverUnreachable,
    control_domain: &str,
    build: &B,
) -> (ResolverConfig, C)
where
    C: DnsClient,
    B: Fn(SocketAddr) -> C,
{
    warn!("{unreachable}");

    let fallback_client = build(DEFAULT_DNS_SERVER_ADDR);
    let verified = match verify_resolver(&fallback_client, control_domain).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Default DNS server {DEFAULT_DNS_SERVER_ADDR} is unreachable too ({e}); lookups will likely fail");
            false
        }
    };

    let config = ResolverConfig {
        server: DEFAULT_DNS_SERVER_ADDR,
        verified,
        fallback: Some(unreachable),
    };
    (config, fallback_client)
}

/// Initializes the DNS client for the run from the configuration.
///
/// Never fails: an unusable server is replaced by the default one (see
/// [`select_configured_resolver`]).
pub async fn init_resolver(config: &Config) -> (ResolverConfig, HickoryDnsClient) {
    let timeout = Duration::from_secs(config.dns_timeout_seconds);
    select_configured_resolver(&config.dns_server, &config.control_domain, |server| {
        HickoryDnsClient::new(server, timeout)
    })
    .await
}
