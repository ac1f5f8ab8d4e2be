//! Probe result types.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::dns::MxRecord;
use crate::error_handling::{DnsLookupError, HttpFetchError, ProbeKind};

/// What a single DNS probe produced.
///
/// Exactly one of found records, a confirmed absence, or a lookup failure holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RecordOutcome<T> {
    Found(T),
    Absent,
    Failed(DnsLookupError),
}

impl<T> RecordOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, RecordOutcome::Found(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecordOutcome::Failed(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            RecordOutcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DnsLookupError> {
        match self {
            RecordOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// The TXT-based records a report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxtRecordKind {
    Spf,
    Dmarc,
    MtaSts,
    TlsRpt,
    Bimi,
}

impl TxtRecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxtRecordKind::Spf => "SPF",
            TxtRecordKind::Dmarc => "DMARC",
            TxtRecordKind::MtaSts => "MTA-STS",
            TxtRecordKind::TlsRpt => "TLS-RPT",
            TxtRecordKind::Bimi => "BIMI",
        }
    }

    /// Statistics bucket for failed lookups of this record.
    pub fn probe_kind(&self) -> ProbeKind {
        match self {
            TxtRecordKind::Spf => ProbeKind::Spf,
            TxtRecordKind::Dmarc => ProbeKind::Dmarc,
            TxtRecordKind::MtaSts => ProbeKind::MtaSts,
            TxtRecordKind::TlsRpt => ProbeKind::TlsRpt,
            TxtRecordKind::Bimi => ProbeKind::Bimi,
        }
    }
}

impl std::fmt::Display for TxtRecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Mail exchangers of a domain.
///
/// Serializes with a `count` field next to the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxProbeResult {
    /// Queried name
    pub name: String,
    /// Records in resolver order
    pub outcome: RecordOutcome<Vec<MxRecord>>,
}

impl MxProbeResult {
    /// Number of MX records found, zero when absent or failed.
    pub fn count(&self) -> usize {
        self.outcome.found().map_or(0, Vec::len)
    }
}

impl Serialize for MxProbeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MxProbeResult", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("count", &self.count())?;
        state.serialize_field("outcome", &self.outcome)?;
        state.end()
    }
}

/// Outcome of a TXT-based check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxtProbeResult {
    pub kind: TxtRecordKind,
    /// Queried name, e.g. `_dmarc.example.com`
    pub name: String,
    /// Raw strings, verbatim
    pub outcome: RecordOutcome<Vec<String>>,
}

/// Whether anything is published under `_domainkey.<domain>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DkimPresenceResult {
    pub name: String,
    /// Number of records in the answer
    pub outcome: RecordOutcome<usize>,
}

/// Existence check for one DKIM selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DkimSelectorResult {
    pub selector: String,
    /// Provider usually behind this selector; `None` for a caller-supplied selector
    pub provider: Option<String>,
    /// Queried name, `<selector>._domainkey.<domain>`
    pub name: String,
    pub found: bool,
    /// Lookup failure other than a plain "does not exist"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<DnsLookupError>,
}

/// Fields of an MTA-STS policy document.
///
/// Every field is optional: the parser is lenient and a body that is not a
/// policy at all simply yields empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyFields {
    pub version: Option<String>,
    pub mode: Option<String>,
    pub max_age: Option<u64>,
    pub mx: Vec<String>,
}

/// Result of the policy GET.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PolicyFetchOutcome {
    Fetched { body: String, fields: PolicyFields },
    Failed { error: HttpFetchError },
}

/// Fetched MTA-STS policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MtaStsPolicy {
    pub url: String,
    pub fetch: PolicyFetchOutcome,
}

impl MtaStsPolicy {
    pub fn fields(&self) -> Option<&PolicyFields> {
        match &self.fetch {
            PolicyFetchOutcome::Fetched { fields, .. } => Some(fields),
            PolicyFetchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&HttpFetchError> {
        match &self.fetch {
            PolicyFetchOutcome::Failed { error } => Some(error),
            PolicyFetchOutcome::Fetched { .. } => None,
        }
    }
}

/// The `_mta-sts` TXT record plus, when it exists, the policy it advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MtaStsResult {
    pub record: TxtProbeResult,
    /// `None` unless the TXT record was found
    pub policy: Option<MtaStsPolicy>,
}
