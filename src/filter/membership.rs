//! Membership Filter Module
//!
//! Thread-safe wrapper over [`BloomFilter`]: `add` takes the write lock,
//! `test` the read lock. Locks are held only for the bit operations.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::bloom::BloomFilter;
use super::params::FilterParams;
use crate::error::ConfigError;

// == Membership Filter ==
/// Shared, append-only probabilistic set.
#[derive(Debug)]
pub struct MembershipFilter {
    inner: RwLock<BloomFilter>,
}

impl MembershipFilter {
    // == Constructor ==
    /// Creates a filter sized for `capacity` elements at `false_positive_rate`.
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self, ConfigError> {
        BloomFilter::with_estimates(capacity, false_positive_rate).map(Self::from_bloom)
    }

    /// Wraps an existing Bloom filter.
    pub fn from_bloom(bloom: BloomFilter) -> Self {
        Self {
            inner: RwLock::new(bloom),
        }
    }

    // == Add ==
    /// Records `element` as present.
    pub fn add(&self, element: &[u8]) {
        self.write().add(element);
    }

    // == Test ==
    /// Returns false only if `element` was never added.
    pub fn test(&self, element: &[u8]) -> bool {
        self.read().test(element)
    }

    /// Filter size in bits
    pub fn size_bits(&self) -> usize {
        self.read().size_bits()
    }

    /// Number of hash functions
    pub fn hash_count(&self) -> usize {
        self.read().hash_count()
    }

    /// Number of add calls so far
    pub fn elements_added(&self) -> usize {
        self.read().elements_added()
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.read().bits_set()
    }

    /// Estimated false-positive rate given the elements added so far
    pub fn estimated_fpr(&self) -> f64 {
        self.read().estimated_fpr()
    }

    // A panic while holding the lock cannot leave the bit array in a state
    // that breaks the no-false-negative property, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, BloomFilter> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BloomFilter> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MembershipFilter {
    fn default() -> Self {
        Self::from_bloom(BloomFilter::new(FilterParams::default()))
    }
}
