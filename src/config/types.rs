//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CONTROL_DOMAIN, DEFAULT_BIMI_SELECTOR, DEFAULT_CSV_COLUMN, DEFAULT_DNS_SERVER,
    DNS_TIMEOUT_SECS, HTTP_TIMEOUT_SECS,
};
use crate::domain::DomainName;
use crate::error_handling::InitializationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable block per domain (default)
    Plain,
    /// One JSON object per domain (JSON Lines)
    Json,
    /// One flattened CSV row per domain
    Csv,
}

/// Command-line options.
///
/// Converted into a [`Config`] before anything else happens, so the library
/// never depends on clap types directly.
///
/// # Examples
///
/// ```bash
/// # Audit two domains against the default nameserver
/// mail_posture example.com example.org
///
/// # Batch file with a custom DKIM selector and JSON output
/// mail_posture --file domains.csv --dkim-selector google --output-format json
///
/// # Query a specific nameserver
/// mail_posture --dns-server 1.1.1.1 example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mail_posture",
    version,
    about = "Audits the email-authentication DNS records (MX, SPF, DMARC, DKIM, MTA-STS, TLS-RPT, BIMI) of one or more domains."
)]
pub struct Opt {
    /// Domains to audit
    pub domains: Vec<String>,

    /// Read domains from a text file (one per line), a .csv file, or `-` for stdin
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// CSV column holding the domain name
    #[arg(long, default_value = DEFAULT_CSV_COLUMN)]
    pub csv_column: String,

    /// DNS server to query (IP or IP:port)
    #[arg(long, short = 's', env = "MAIL_POSTURE_DNS_SERVER", default_value = DEFAULT_DNS_SERVER)]
    pub dns_server: String,

    /// Domain resolved once at startup to verify the DNS server answers
    #[arg(long, default_value = CONTROL_DOMAIN)]
    pub control_domain: String,

    /// Additional DKIM selector to check besides the known ones
    #[arg(long, env = "MAIL_POSTURE_DKIM_SELECTOR")]
    pub dkim_selector: Option<String>,

    /// BIMI selector (`<selector>._bimi.<domain>`)
    #[arg(long, default_value = DEFAULT_BIMI_SELECTOR)]
    pub bimi_selector: String,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_seconds: u64,

    /// HTTP timeout in seconds for the MTA-STS policy fetch
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub http_timeout_seconds: u64,

    /// User-Agent header for the MTA-STS policy fetch (none by default)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Report format: plain|json|csv
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output_format: OutputFormat,

    /// Write reports to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use mail_posture::Config;
///
/// let config = Config {
///     domains: vec!["example.com".to_string()],
///     dkim_selector: Some("google".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domains given directly (CLI arguments)
    pub domains: Vec<String>,

    /// Optional batch file (text, CSV, or `-` for stdin)
    pub file: Option<PathBuf>,

    /// CSV column holding the domain name
    pub csv_column: String,

    /// Requested DNS server (IP or IP:port)
    pub dns_server: String,

    /// Domain used for the startup reachability check
    pub control_domain: String,

    /// Custom DKIM selector appended after the known ones
    pub dkim_selector: Option<String>,

    /// BIMI selector
    pub bimi_selector: String,

    /// DNS query timeout in seconds
    pub dns_timeout_seconds: u64,

    /// HTTP timeout in seconds
    pub http_timeout_seconds: u64,

    /// Optional User-Agent for the policy fetch
    pub user_agent: Option<String>,

    /// Report format
    pub output_format: OutputFormat,

    /// Report destination (stdout when `None`)
    pub output: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            file: None,
            csv_column: DEFAULT_CSV_COLUMN.to_string(),
            dns_server: DEFAULT_DNS_SERVER.to_string(),
            control_domain: CONTROL_DOMAIN.to_string(),
            dkim_selector: None,
            bimi_selector: DEFAULT_BIMI_SELECTOR.to_string(),
            dns_timeout_seconds: DNS_TIMEOUT_SECS,
            http_timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: None,
            output_format: OutputFormat::Plain,
            output: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domains: opt.domains,
            file: opt.file,
            csv_column: opt.csv_column,
            dns_server: opt.dns_server,
            control_domain: opt.control_domain,
            dkim_selector: opt.dkim_selector,
            bimi_selector: opt.bimi_selector,
            dns_timeout_seconds: opt.dns_timeout_seconds,
            http_timeout_seconds: opt.http_timeout_seconds,
            user_agent: opt.user_agent,
            output_format: opt.output_format,
            output: opt.output,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot validate on its own.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.dns_timeout_seconds == 0 {
            return Err(InitializationError::ConfigError(
                "DNS timeout must be at least 1 second".to_string(),
            ));
        }
        if self.http_timeout_seconds == 0 {
            return Err(InitializationError::ConfigError(
                "HTTP timeout must be at least 1 second".to_string(),
            ));
        }
        if self.csv_column.trim().is_empty() {
            return Err(InitializationError::ConfigError(
                "CSV column name must not be empty".to_string(),
            ));
        }
        if !is_valid_selector(&self.bimi_selector) {
            return Err(InitializationError::ConfigError(format!(
                "invalid BIMI selector '{}'",
                self.bimi_selector
            )));
        }
        if let Some(selector) = &self.dkim_selector {
            if !is_valid_selector(selector) {
                return Err(InitializationError::ConfigError(format!(
                    "invalid DKIM selector '{selector}'"
                )));
            }
        }
        DomainName::parse(&self.control_domain).map_err(|e| {
            InitializationError::ConfigError(format!("invalid control domain: {e}"))
        })?;
        Ok(())
    }
}

/// Selectors are one or more DNS labels (`s1` or `s1.mail`).
fn is_valid_selector(selector: &str) -> bool {
    !selector.is_empty()
        && selector.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= crate::config::MAX_LABEL_LENGTH
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}
