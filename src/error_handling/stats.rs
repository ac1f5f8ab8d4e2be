//! Processing statistics tracking.
//!
//! This module provides thread-safe counters of probe failures during an audit run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ProbeKind;

/// Thread-safe probe failure tracker.
///
/// Holds one atomic counter per [`ProbeKind`], all initialized to zero on
/// creation. A failure here is a lookup or fetch error stored in a report, not a
/// legitimately absent record.
pub struct ProcessingStats {
    failures: HashMap<ProbeKind, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in ProbeKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats { failures }
    }

    /// Increment the failure counter of a probe.
    pub fn increment_failure(&self, kind: ProbeKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Get the failure count of a probe.
    pub fn get_failure_count(&self, kind: ProbeKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures across all probes.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Non-zero counters, in probe order.
    pub fn failures_by_kind(&self) -> Vec<(ProbeKind, usize)> {
        ProbeKind::iter()
            .map(|kind| (kind, self.get_failure_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
