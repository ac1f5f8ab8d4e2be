//! CSV output: one flattened row per domain.
//!
//! Multi-valued fields are joined with ` | `; a failed lookup puts its error
//! message in the value column next to a `failed` status.

use std::io::Write;

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;

use crate::probe::{RecordOutcome, TxtProbeResult};
use crate::report::DomainReport;

use super::{outcome_status, ReportWriter};

const JOIN: &str = " | ";

/// Flattened view of a [`DomainReport`].
#[derive(Debug, Serialize)]
pub struct CsvRow {
    pub domain: String,
    pub mx_status: &'static str,
    pub mx_count: usize,
    pub mx: String,
    pub spf_status: &'static str,
    pub spf: String,
    pub dmarc_status: &'static str,
    pub dmarc: String,
    pub dkim_presence_status: &'static str,
    pub dkim_selectors_found: String,
    pub mta_sts_status: &'static str,
    pub mta_sts: String,
    pub mta_sts_policy_mode: String,
    pub mta_sts_policy_error: String,
    pub tls_rpt_status: &'static str,
    pub tls_rpt: String,
    pub bimi_status: &'static str,
    pub bimi: String,
}

fn txt_value(result: &TxtProbeResult) -> String {
    match &result.outcome {
        RecordOutcome::Found(records) => records.join(JOIN),
        RecordOutcome::Absent => String::new(),
        RecordOutcome::Failed(e) => e.to_string(),
    }
}

impl From<&DomainReport> for CsvRow {
    fn from(report: &DomainReport) -> Self {
        let mx = match &report.mx.outcome {
            RecordOutcome::Found(records) => records
                .iter()
                .map(|r| format!("{} {}", r.preference, r.exchange))
                .collect::<Vec<_>>()
                .join(JOIN),
            RecordOutcome::Absent => String::new(),
            RecordOutcome::Failed(e) => e.to_string(),
        };
        let policy = report.mta_sts.policy.as_ref();

        Self {
            domain: report.domain.to_string(),
            mx_status: outcome_status(&report.mx.outcome),
            mx_count: report.mx.count(),
            mx,
            spf_status: outcome_status(&report.spf.outcome),
            spf: txt_value(&report.spf),
            dmarc_status: outcome_status(&report.dmarc.outcome),
            dmarc: txt_value(&report.dmarc),
            dkim_presence_status: outcome_status(&report.dkim_presence.outcome),
            dkim_selectors_found: report
                .dkim_selectors
                .iter()
                .filter(|s| s.found)
                .map(|s| s.selector.as_str())
                .collect::<Vec<_>>()
                .join(JOIN),
            mta_sts_status: outcome_status(&report.mta_sts.record.outcome),
            mta_sts: txt_value(&report.mta_sts.record),
            mta_sts_policy_mode: policy
                .and_then(|p| p.fields())
                .and_then(|f| f.mode.clone())
                .unwrap_or_default(),
            mta_sts_policy_error: policy
                .and_then(|p| p.error())
                .map(ToString::to_string)
                .unwrap_or_default(),
            tls_rpt_status: outcome_status(&report.tls_rpt.outcome),
            tls_rpt: txt_value(&report.tls_rpt),
            bimi_status: outcome_status(&report.bimi.outcome),
            bimi: txt_value(&report.bimi),
        }
    }
}

pub struct CsvReportWriter {
    writer: Writer<Box<dyn Write>>,
}

impl CsvReportWriter {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            writer: Writer::from_writer(out),
        }
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_report(&mut self, report: &DomainReport) -> Result<()> {
        self.writer
            .serialize(CsvRow::from(report))
            .with_context(|| format!("Failed to write CSV row for {}", report.domain))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush CSV output")
    }
}
