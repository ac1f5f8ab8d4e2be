//! Report rendering.
//!
//! Renderers turn [`DomainReport`]s into text. The probes and the report builder
//! never format anything themselves.

mod csv;
mod jsonl;
mod plain;

use std::io::Write;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::probe::RecordOutcome;
use crate::report::DomainReport;

pub use self::csv::{CsvReportWriter, CsvRow};
pub use jsonl::JsonLinesReportWriter;
pub use plain::{render_plain, PlainReportWriter};

/// Writes reports one at a time as they arrive.
pub trait ReportWriter {
    fn write_report(&mut self, report: &DomainReport) -> Result<()>;

    /// Flushes buffered output. Called once after the last report.
    fn finish(&mut self) -> Result<()>;
}

/// Creates the writer for `format` on top of `out`.
///
/// `color` only affects the plain format; colors are still subject to
/// `colored`'s terminal and `NO_COLOR` detection.
pub fn report_writer(
    format: OutputFormat,
    out: Box<dyn Write>,
    color: bool,
) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Plain => Box::new(PlainReportWriter::new(out, color)),
        OutputFormat::Json => Box::new(JsonLinesReportWriter::new(out)),
        OutputFormat::Csv => Box::new(CsvReportWriter::new(out)),
    }
}

/// `found`, `absent` or `failed`.
pub(crate) fn outcome_status<T>(outcome: &RecordOutcome<T>) -> &'static str {
    match outcome {
        RecordOutcome::Found(_) => "found",
        RecordOutcome::Absent => "absent",
        RecordOutcome::Failed(_) => "failed",
    }
}
