//! Gated Cache Module
//!
//! Decorator that consults a membership filter before every backend read.
//! A key that was never written is answered locally; every other lookup
//! reaches the backend exactly once.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::stats::{GateCounters, GateStats};
use crate::backend::Backend;
use crate::error::{ConfigError, GateError};
use crate::filter::{MembershipFilter, DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE};
use crate::key::Key;

// == Gate Config ==
/// Sizing of the membership filter, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    /// Expected number of distinct keys
    pub capacity: usize,
    /// Target false-positive probability at capacity
    pub false_positive_rate: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
        }
    }
}

// == Gated Cache ==
/// Membership-gated decorator over a [`Backend`].
///
/// Owns its filter; holds `B` as a handle. Pass `&B` or `Arc<B>` to keep the
/// backend's lifecycle with the caller.
#[derive(Debug)]
pub struct GatedCache<B> {
    /// Wrapped store, reached at most once per call
    backend: B,
    /// Keys ever written through this gate
    filter: MembershipFilter,
    /// Routing counters
    counters: GateCounters,
}

impl<B: Backend> GatedCache<B> {
    // == Constructor ==
    /// Creates a gate with the default filter (1,000,000 keys at 1%).
    pub fn new(backend: B) -> Self {
        Self::with_filter(backend, MembershipFilter::default())
    }

    /// Creates a gate with a filter sized by `config`.
    pub fn with_config(backend: B, config: GateConfig) -> Result<Self, ConfigError> {
        let filter = MembershipFilter::new(config.capacity, config.false_positive_rate)?;
        Ok(Self::with_filter(backend, filter))
    }

    /// Creates a gate over a pre-built filter.
    pub fn with_filter(backend: B, filter: MembershipFilter) -> Self {
        debug!(
            "Membership gate created: {} bits, {} hash functions",
            filter.size_bits(),
            filter.hash_count()
        );
        Self {
            backend,
            filter,
            counters: GateCounters::default(),
        }
    }

    // == Set ==
    /// Records `key` in the filter, then writes through to the backend.
    ///
    /// The filter entry stays set even if the backend write fails; that only
    /// costs one extra backend read later.
    pub fn set(&self, key: Key, value: B::Value) -> Result<(), GateError<B::Error>> {
        {
            let canonical = self.canonical(&key)?;
            self.filter.add(&canonical);
        }

        self.counters.record_write();
        self.backend.set(key, value).map_err(|err| {
            self.counters.record_backend_error();
            GateError::Backend(err)
        })
    }

    // == Get ==
    /// Returns `Ok(None)` without touching the backend if `key` was never
    /// written; otherwise returns whatever the backend returns.
    pub fn get(&self, key: &Key) -> Result<Option<B::Value>, GateError<B::Error>> {
        let canonical = self.canonical(key)?;
        self.counters.record_lookup();

        if !self.filter.test(&canonical) {
            self.counters.record_short_circuit();
            debug!("Membership miss for key {}, backend skipped", key);
            return Ok(None);
        }

        self.counters.record_delegated_get();
        self.backend.get(key).map_err(|err| {
            self.counters.record_backend_error();
            GateError::Backend(err)
        })
    }

    // == Stats ==
    /// Returns a snapshot of the routing counters.
    pub fn stats(&self) -> GateStats {
        self.counters.snapshot()
    }

    /// Read-only access to the membership filter.
    pub fn filter(&self) -> &MembershipFilter {
        &self.filter
    }

    /// The wrapped backend handle.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn canonical<'k>(&self, key: &'k Key) -> Result<Cow<'k, [u8]>, GateError<B::Error>> {
        key.canonical_bytes().ok_or_else(|| {
            self.counters.record_rejected_key();
            warn!("Rejected key of unsupported type {}", key.kind());
            GateError::UnsupportedKeyType(key.kind())
        })
    }
}

// == Backend Implementation ==
impl<B: Backend> Backend for GatedCache<B> {
    type Value = B::Value;
    type Error = GateError<B::Error>;

    fn get(&self, key: &Key) -> Result<Option<Self::Value>, Self::Error> {
        GatedCache::get(self, key)
    }

    fn set(&self, key: Key, value: Self::Value) -> Result<(), Self::Error> {
        GatedCache::set(self, key, value)
    }
}
