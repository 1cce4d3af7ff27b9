//! Generation run metrics.
//!
//! Collected unconditionally by [`Generator::generate`](crate::Generator::generate);
//! the numbers are cheap (a timer and a few counters per kind). They are what
//! the CLI's `--summary` view prints and are handy for spotting upstream data
//! drift between runs, e.g. a jump in `dropped` means new unflagged collisions.

use std::collections::BTreeMap;
use std::time::Duration;

/// What happened to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Symbols were produced and the kind is part of the result set.
    Generated,
    /// Recognized, but had nothing to emit.
    Skipped,
    /// The pass failed or the kind is unknown; excluded from the result set.
    Failed,
}

/// Timing and counters for a single kind's pass.
#[derive(Debug, Clone)]
pub struct KindMetrics {
    pub outcome: Outcome,
    /// Elapsed time for the pass.
    pub duration: Duration,
    /// Input records seen.
    pub records: usize,
    /// Symbols in the final output.
    pub symbols: usize,
    /// Symbols whose identifier got an origin suffix.
    pub disambiguated: usize,
    /// Symbols dropped for an empty, unwritable or duplicate identifier.
    pub dropped: usize,
}

impl KindMetrics {
    pub(crate) fn failed(duration: Duration, records: usize) -> Self {
        KindMetrics { outcome: Outcome::Failed, duration, records, symbols: 0, disambiguated: 0, dropped: 0 }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Generator::generate`](crate::Generator::generate).
    pub total: Duration,
    /// Per-kind metrics, keyed by kind name.
    pub kinds: BTreeMap<String, KindMetrics>,
}

impl RunMetrics {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.kinds.values().filter(|k| k.outcome == outcome).count()
    }

    pub fn symbols(&self) -> usize {
        self.kinds.values().map(|k| k.symbols).sum()
    }
}
