//! Record conversions from resolver answers.

use hickory_resolver::lookup::Lookup;
use hickory_resolver::proto::rr::RData;
use serde::Serialize;

/// One mail-exchanger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MxRecord {
    /// Exchange host, without the trailing dot
    pub exchange: String,
    /// Preference (lower is tried first)
    pub preference: u16,
    /// Record TTL in seconds
    pub ttl: u32,
}

impl MxRecord {
    pub fn new(exchange: impl Into<String>, preference: u16, ttl: u32) -> Self {
        let exchange = exchange.into();
        let exchange = exchange.trim_end_matches('.').to_string();
        Self {
            exchange,
            preference,
            ttl,
        }
    }
}

/// Extracts MX records in answer order.
///
/// The order is whatever the resolver returned; callers must not assume it is
/// sorted by preference.
pub(crate) fn mx_records_from_lookup(lookup: &Lookup) -> Vec<MxRecord> {
    lookup
        .record_iter()
        .filter_map(|record| match record.data() {
            Some(RData::MX(mx)) => Some(MxRecord::new(
                mx.exchange().to_utf8(),
                mx.preference(),
                record.ttl(),
            )),
            _ => None,
        })
        .collect()
}

/// Extracts TXT strings, one per record.
///
/// A TXT record may hold several character-strings; they are concatenated
/// without separator, which is how SPF and DMARC consumers read them.
pub(crate) fn txt_strings_from_lookup(lookup: &Lookup) -> Vec<String> {
    lookup
        .iter()
        .filter_map(|rdata| {
            if let RData::TXT(txt) = rdata {
                Some(join_txt_segments(txt.iter().map(|bytes| &**bytes)))
            } else {
                None
            }
        })
        .collect()
}

pub(crate) fn join_txt_segments<'a>(segments: impl Iterator<Item = &'a [u8]>) -> String {
    segments
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect::<Vec<String>>()
        .join("")
}
