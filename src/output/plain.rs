//! Human-readable, colored report blocks.

use std::io::Write;

use anyhow::{Context, Result};
use colored::{Color, Colorize};

use crate::probe::{MtaStsPolicy, PolicyFetchOutcome, RecordOutcome, TxtProbeResult};
use crate::report::DomainReport;

use super::ReportWriter;

const LABEL_WIDTH: usize = 9;
const DETAIL_INDENT: &str = "              ";

/// Applies colors only when the destination wants them.
#[derive(Clone, Copy)]
struct Palette {
    color: bool,
}

impl Palette {
    fn paint(self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn green(self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    fn yellow(self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    fn red(self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    fn bold(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn line(label: &str, text: String) -> String {
    format!("  {:<width$} {text}\n", label, width = LABEL_WIDTH)
}

fn detail(text: String) -> String {
    format!("{DETAIL_INDENT}{text}\n")
}

fn txt_lines(result: &TxtProbeResult, palette: Palette) -> String {
    let label = result.kind.label();
    match &result.outcome {
        RecordOutcome::Found(records) => {
            let mut out = String::new();
            for (i, record) in records.iter().enumerate() {
                if i == 0 {
                    out.push_str(&line(label, palette.green(record)));
                } else {
                    out.push_str(&detail(palette.green(record)));
                }
            }
            out
        }
        RecordOutcome::Absent => line(
            label,
            palette.yellow(&format!("no record at {}", result.name)),
        ),
        RecordOutcome::Failed(e) => line(
            label,
            palette.red(&format!("lookup of {} failed: {e}", result.name)),
        ),
    }
}

fn policy_lines(policy: &MtaStsPolicy, palette: Palette) -> String {
    match &policy.fetch {
        PolicyFetchOutcome::Fetched { fields, .. } => {
            let mode = fields.mode.as_deref().unwrap_or("unknown");
            let mut summary = format!("policy mode {mode}");
            if let Some(max_age) = fields.max_age {
                summary.push_str(&format!(", max_age {max_age}"));
            }
            if !fields.mx.is_empty() {
                summary.push_str(&format!(", mx {}", fields.mx.join(" ")));
            }
            let summary = if mode == "enforce" {
                palette.green(&summary)
            } else {
                palette.yellow(&summary)
            };
            detail(summary)
        }
        PolicyFetchOutcome::Failed { error } => detail(palette.red(&format!(
            "policy fetch from {} failed: {error}",
            policy.url
        ))),
    }
}

/// Renders one report as a block of text, with ANSI colors when `color` is set.
pub fn render_plain(report: &DomainReport, color: bool) -> String {
    let palette = Palette { color };
    let mut out = format!("{}\n", palette.bold(report.domain.as_str()));

    match &report.mx.outcome {
        RecordOutcome::Found(records) => {
            out.push_str(&line(
                "MX",
                palette.green(&format!("{} record(s)", records.len())),
            ));
            for record in records {
                out.push_str(&detail(format!("{:>5} {}", record.preference, record.exchange)));
            }
        }
        RecordOutcome::Absent => out.push_str(&line("MX", palette.yellow("no MX records"))),
        RecordOutcome::Failed(e) => {
            out.push_str(&line("MX", palette.red(&format!("lookup failed: {e}"))))
        }
    }

    out.push_str(&txt_lines(&report.spf, palette));
    out.push_str(&txt_lines(&report.dmarc, palette));

    let presence = &report.dkim_presence;
    let presence_text = match &presence.outcome {
        RecordOutcome::Found(count) => {
            palette.green(&format!("{count} record(s) at {}", presence.name))
        }
        RecordOutcome::Absent => palette.yellow(&format!("nothing at {}", presence.name)),
        RecordOutcome::Failed(e) => {
            palette.red(&format!("lookup of {} failed: {e}", presence.name))
        }
    };
    out.push_str(&line("DKIM", presence_text));
    for selector in &report.dkim_selectors {
        let provider = selector
            .provider
            .as_deref()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        let status = match (selector.found, &selector.failure) {
            (true, _) => palette.green("found"),
            (false, Some(e)) => palette.red(&format!("not found: {e}")),
            (false, None) => palette.yellow("not found"),
        };
        out.push_str(&detail(format!("{}{provider}: {status}", selector.selector)));
    }

    out.push_str(&txt_lines(&report.mta_sts.record, palette));
    if let Some(policy) = &report.mta_sts.policy {
        out.push_str(&policy_lines(policy, palette));
    }
    out.push_str(&txt_lines(&report.tls_rpt, palette));
    out.push_str(&txt_lines(&report.bimi, palette));
    out
}

/// Writes [`render_plain`] blocks separated by blank lines.
pub struct PlainReportWriter {
    out: Box<dyn Write>,
    color: bool,
    written: usize,
}

impl PlainReportWriter {
    pub fn new(out: Box<dyn Write>, color: bool) -> Self {
        Self {
            out,
            color,
            written: 0,
        }
    }
}

impl ReportWriter for PlainReportWriter {
    fn write_report(&mut self, report: &DomainReport) -> Result<()> {
        if self.written > 0 {
            writeln!(self.out).context("Failed to write report")?;
        }
        self.out
            .write_all(render_plain(report, self.color).as_bytes())
            .context("Failed to write report")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush report output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;

    #[test]
    fn test_render_plain_sections() {
        let text = render_plain(&sample_report(), false);

        assert!(text.starts_with("example.com\n"));
        assert!(text.contains("MX        2 record(s)"));
        let mx1 = text.find("mx1.example.com").unwrap();
        let mx2 = text.find("mx2.example.com").unwrap();
        assert!(mx1 < mx2);
        assert!(text.contains("SPF       v=spf1 include:_spf.example.com ~all"));
        assert!(text.contains("DMARC     v=DMARC1; p=reject;"));
        assert!(text.contains("lookup of _domainkey.example.com failed"));
        assert!(text.contains("selector1 (Microsoft 365): found"));
        assert!(text.contains("k1 (Mailchimp): not found"));
        assert!(text.contains("policy mode enforce, max_age 604800, mx mx1.example.com"));
        assert!(text.contains("TLS-RPT   lookup of _smtp._tls.example.com failed"));
        assert!(text.contains("BIMI      no record at default._bimi.example.com"));
    }

    #[test]
    fn test_plain_writer_separates_blocks() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handle = file.reopen().unwrap();
        let mut writer = PlainReportWriter::new(Box::new(handle), false);
        writer.write_report(&sample_report()).unwrap();
        writer.write_report(&sample_report()).unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.matches("example.com\n  MX").count(), 2);
        assert!(text.contains("\n\nexample.com\n"));
    }

    #[test]
    fn test_uncolored_output_has_no_escapes() {
        colored::control::set_override(true);
        let text = render_plain(&sample_report(), false);
        assert!(!text.contains('\x1b'));

        let colored_text = render_plain(&sample_report(), true);
        assert!(colored_text.contains('\x1b'));
        colored::control::unset_override();
    }
}
