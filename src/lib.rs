//! mail_posture library: email-authentication posture audits
//!
//! This library queries DNS for the anti-spoofing record set of a domain (MX,
//! SPF, DMARC, DKIM, MTA-STS, TLS-RPT, BIMI), fetches the MTA-STS policy over
//! HTTPS when one is advertised, and produces one typed report per domain.
//!
//! # Example
//!
//! ```no_run
//! use mail_posture::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec!["example.com".to_string()],
//!     dns_server: "1.1.1.1".to_string(),
//!     ..Default::default()
//! };
//!
//! let summary = run_audit(config).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```
//!
//! The engine can also be driven directly, with any [`dns::DnsClient`] and
//! [`fetch::PolicyFetcher`]:
//!
//! ```no_run
//! use futures::StreamExt;
//! use mail_posture::batch::audit_domains;
//! use mail_posture::domain::DomainName;
//! use mail_posture::report::{AuditContext, ProbeOptions};
//! use mail_posture::testing::{MockDnsClient, MockPolicyFetcher};
//! # use mail_posture::dns::ResolverConfig;
//!
//! # async fn demo(resolver: ResolverConfig) {
//! let ctx = AuditContext::new(
//!     MockDnsClient::new(),
//!     MockPolicyFetcher::new(),
//!     ProbeOptions::default(),
//!     resolver,
//! );
//! let domains = vec![DomainName::parse("example.com").unwrap()];
//! let mut reports = Box::pin(audit_domains(&ctx, domains));
//! while let Some(report) = reports.next().await {
//!     println!("{}: {} MX records", report.domain, report.mx.count());
//! }
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod batch;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod input;
pub mod output;
pub mod probe;
pub mod report;
mod run;
pub mod testing;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, OutputFormat};
pub use domain::DomainName;
pub use report::DomainReport;
pub use run::{audit_to_writer, run_audit, AuditSummary};
