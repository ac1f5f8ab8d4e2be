//! Record probes.
//!
//! Each probe takes a domain and the DNS client (plus the policy fetcher for
//! MTA-STS) and returns a typed result. Probes never return errors: a failed
//! lookup becomes [`RecordOutcome::Failed`] inside the result, so one bad query
//! cannot stop the others.

mod dkim;
mod mta_sts;
mod mx;
mod policy;
mod txt;
mod types;

pub use dkim::{probe_dkim_presence, probe_dkim_selector, probe_dkim_selectors};
pub use mta_sts::probe_mta_sts;
pub use mx::probe_mx;
pub use policy::parse_policy;
pub use txt::{extract_spf_records, probe_bimi, probe_dmarc, probe_spf, probe_tls_rpt};
pub use types::{
    DkimPresenceResult, DkimSelectorResult, MtaStsPolicy, MtaStsResult, MxProbeResult,
    PolicyFetchOutcome, PolicyFields, RecordOutcome, TxtProbeResult, TxtRecordKind,
};
