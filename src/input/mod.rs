//! Domain list loading.
//!
//! Domains come from CLI arguments and optionally a batch file: plain text with
//! one domain per line (`-` reads stdin), or CSV with a header row when the file
//! name ends in `.csv`. Each raw value goes through [`DomainName::parse`];
//! rejected values are logged and skipped, duplicates are audited once.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::domain::DomainName;
use crate::error_handling::{InputError, InvalidDomainInput};

/// The domains to audit plus what was dropped on the way.
#[derive(Debug, Default)]
pub struct DomainInput {
    /// Valid domains, first occurrence order
    pub domains: Vec<DomainName>,
    /// Inputs that failed validation
    pub rejected: Vec<InvalidDomainInput>,
    /// Valid inputs dropped as repeats
    pub duplicates: usize,
}

/// Validates and de-duplicates raw domain strings.
pub fn collect_domains<I, S>(raw: I) -> DomainInput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut input = DomainInput::default();
    let mut seen = HashSet::new();

    for value in raw {
        match DomainName::parse(value.as_ref()) {
            Ok(domain) => {
                if seen.insert(domain.clone()) {
                    input.domains.push(domain);
                } else {
                    input.duplicates += 1;
                }
            }
            Err(e) => {
                warn!("Skipping {e}");
                input.rejected.push(e);
            }
        }
    }

    input
}

fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn keep_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads one domain per line from `path`, or from stdin when `path` is `-`.
///
/// Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns `InputError::Io` if the file cannot be opened or read.
pub async fn read_text_domains(path: &Path) -> Result<Vec<String>, InputError> {
    let io_error = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut values = Vec::new();
    if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.map_err(io_error)? {
            values.extend(keep_line(&line));
        }
    } else {
        let file = tokio::fs::File::open(path).await.map_err(io_error)?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines.next_line().await.map_err(io_error)? {
            values.extend(keep_line(&line));
        }
    }
    Ok(values)
}

/// Reads the `column` field of every row of a CSV file with a header row.
///
/// The header match ignores case and surrounding whitespace.
///
/// # Errors
///
/// Returns `InputError::Csv` for unreadable or malformed files and
/// `InputError::MissingColumn` if no header matches `column`.
pub fn read_csv_domains(path: &Path, column: &str) -> Result<Vec<String>, InputError> {
    let csv_error = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let wanted = column.trim();
    let index = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .position(|header| header.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: wanted.to_string(),
        })?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        values.push(record.get(index).unwrap_or_default().to_string());
    }
    Ok(values)
}

/// Gathers the domains of a run: CLI arguments first, then the batch file.
///
/// # Errors
///
/// Returns `InputError::NoDomains` when no valid domain remains, or the error of
/// reading the batch file.
pub async fn load_domains(config: &Config) -> Result<DomainInput, InputError> {
    let mut raw: Vec<String> = config.domains.clone();

    if let Some(path) = &config.file {
        let from_file = if is_csv_path(path) {
            read_csv_domains(path, &config.csv_column)?
        } else {
            read_text_domains(path).await?
        };
        info!("Read {} entries from {}", from_file.len(), display_path(path));
        raw.extend(from_file);
    }

    let input = collect_domains(raw);
    if input.duplicates > 0 {
        info!("Ignoring {} duplicate domain(s)", input.duplicates);
    }
    if input.domains.is_empty() {
        return Err(InputError::NoDomains);
    }
    Ok(input)
}

fn display_path(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}
