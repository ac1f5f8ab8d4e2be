//! JSON Lines output: one serialized [`DomainReport`] per line.

use std::io::Write;

use anyhow::{Context, Result};

use crate::report::DomainReport;

use super::ReportWriter;

pub struct JsonLinesReportWriter {
    out: Box<dyn Write>,
}

impl JsonLinesReportWriter {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl ReportWriter for JsonLinesReportWriter {
    fn write_report(&mut self, report: &DomainReport) -> Result<()> {
        serde_json::to_writer(&mut self.out, report)
            .with_context(|| format!("Failed to serialize report for {}", report.domain))?;
        writeln!(self.out).context("Failed to write report")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush report output")
    }
}
