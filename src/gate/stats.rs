//! Gate Statistics Module
//!
//! Counts how the gate routed each call: short-circuited, delegated,
//! rejected, or failed in the backend.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Gate Counters ==
/// Live counters updated by concurrent callers.
#[derive(Debug, Default)]
pub(crate) struct GateCounters {
    lookups: AtomicU64,
    short_circuits: AtomicU64,
    delegated_gets: AtomicU64,
    writes: AtomicU64,
    rejected_keys: AtomicU64,
    backend_errors: AtomicU64,
}

impl GateCounters {
    pub(crate) fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_short_circuit(&self) {
        self.short_circuits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delegated_get(&self) {
        self.delegated_gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected_key(&self) {
        self.rejected_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of every counter.
    pub(crate) fn snapshot(&self) -> GateStats {
        GateStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            short_circuits: self.short_circuits.load(Ordering::Relaxed),
            delegated_gets: self.delegated_gets.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            rejected_keys: self.rejected_keys.load(Ordering::Relaxed),
            backend_errors: self.backend_errors.load(Ordering::Relaxed),
        }
    }
}

// == Gate Stats ==
/// Snapshot of gate routing decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GateStats {
    /// Gets with a supported key
    pub lookups: u64,
    /// Gets answered locally because the filter test was negative
    pub short_circuits: u64,
    /// Gets forwarded to the backend
    pub delegated_gets: u64,
    /// Sets forwarded to the backend
    pub writes: u64,
    /// Calls refused for an unsupported key type
    pub rejected_keys: u64,
    /// Backend calls that returned an error
    pub backend_errors: u64,
}

impl GateStats {
    // == Short-Circuit Rate ==
    /// Fraction of lookups that never reached the backend.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn short_circuit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.short_circuits as f64 / self.lookups as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = GateCounters::default();
        assert_eq!(counters.snapshot(), GateStats::default());
    }

    #[test]
    fn test_snapshot_reflects_records() {
        let counters = GateCounters::default();
        counters.record_lookup();
        counters.record_lookup();
        counters.record_short_circuit();
        counters.record_delegated_get();
        counters.record_write();
        counters.record_rejected_key();
        counters.record_backend_error();

        let stats = counters.snapshot();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.short_circuits, 1);
        assert_eq!(stats.delegated_gets, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.rejected_keys, 1);
        assert_eq!(stats.backend_errors, 1);
    }

    #[test]
    fn test_short_circuit_rate_no_lookups() {
        assert_eq!(GateStats::default().short_circuit_rate(), 0.0);
    }

    #[test]
    fn test_short_circuit_rate_mixed() {
        let stats = GateStats {
            lookups: 4,
            short_circuits: 3,
            ..GateStats::default()
        };
        assert_eq!(stats.short_circuit_rate(), 0.75);
    }
}
