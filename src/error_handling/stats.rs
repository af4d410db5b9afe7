//! Enrichment statistics tracking.
//!
//! Counts processed events and lookup outcomes per database for the end-of-run
//! report.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::LookupStatus;
use crate::geoip::DatabaseKind;

/// Per-run enrichment statistics.
///
/// Every (database, status) pair is initialized to zero on creation. The
/// pipeline is single-threaded, so counters are plain integers owned by the
/// enricher.
#[derive(Debug, Clone)]
pub struct EnrichmentStats {
    events: usize,
    lookups: HashMap<(DatabaseKind, LookupStatus), usize>,
}

impl EnrichmentStats {
    /// All counters at zero.
    pub fn new() -> Self {
        let mut lookups = HashMap::new();
        for kind in DatabaseKind::iter() {
            for status in LookupStatus::iter() {
                lookups.insert((kind, status), 0);
            }
        }

        EnrichmentStats { events: 0, lookups }
    }

    /// Count one processed event.
    pub fn increment_events(&mut self) {
        self.events += 1;
    }

    /// Count one lookup outcome.
    pub fn increment(&mut self, kind: DatabaseKind, status: LookupStatus) {
        *self.lookups.entry((kind, status)).or_insert(0) += 1;
    }

    /// Number of events processed so far.
    pub fn events(&self) -> usize {
        self.events
    }

    /// Number of lookups in `kind` that ended with `status`.
    pub fn get_count(&self, kind: DatabaseKind, status: LookupStatus) -> usize {
        self.lookups.get(&(kind, status)).copied().unwrap_or(0)
    }

    /// Number of lookups across all databases that ended with `status`.
    pub fn total(&self, status: LookupStatus) -> usize {
        self.lookups
            .iter()
            .filter(|((_, s), _)| *s == status)
            .map(|(_, count)| *count)
            .sum()
    }
}

impl Default for EnrichmentStats {
    fn default() -> Self {
        Self::new()
    }
}
