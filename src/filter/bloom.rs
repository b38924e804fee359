//! Bloom Filter Module
//!
//! Fixed-size bit array with k hash positions per element. An element that
//! was added always tests positive; elements never added test positive with
//! a probability bounded by the sizing parameters.

use std::io::Cursor;

use bitvec::prelude::*;

use super::params::{estimated_fpr, optimal_parameters, FilterParams, MAX_SIZE_BITS};
use crate::error::ConfigError;

// == Bloom Filter ==
/// Append-only Bloom filter. Not synchronized; see
/// [`MembershipFilter`](super::MembershipFilter) for the shared variant.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Number of add calls so far (n)
    n: usize,
}

impl BloomFilter {
    // == Constructor ==
    /// Creates a filter with explicit dimensions.
    ///
    /// `size_bits` is clamped to `1..=MAX_SIZE_BITS`.
    pub fn new(params: FilterParams) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits.clamp(1, MAX_SIZE_BITS)],
            k: params.hash_count.max(1),
            n: 0,
        }
    }

    /// Creates a filter sized for `capacity` elements at `false_positive_rate`.
    pub fn with_estimates(capacity: usize, false_positive_rate: f64) -> Result<Self, ConfigError> {
        optimal_parameters(capacity, false_positive_rate).map(Self::new)
    }

    // == Add ==
    /// Sets every bit position derived from `element`.
    pub fn add(&mut self, element: &[u8]) {
        let m = self.bits.len();
        for pos in positions(element, self.k, m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    // == Test ==
    /// Returns false if `element` was definitely never added.
    pub fn test(&self, element: &[u8]) -> bool {
        positions(element, self.k, self.bits.len()).all(|pos| self.bits[pos])
    }

    /// Filter size in bits (m)
    pub fn size_bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of add calls, duplicates included
    pub fn elements_added(&self) -> usize {
        self.n
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Estimated false-positive rate given the elements added so far
    pub fn estimated_fpr(&self) -> f64 {
        estimated_fpr(self.bits.len(), self.k, self.n)
    }
}

// == Hashing ==
fn murmur(element: &[u8], seed: u32) -> u64 {
    // Reading from an in-memory cursor cannot fail.
    murmur3::murmur3_x64_128(&mut Cursor::new(element), seed).unwrap_or(0) as u64
}

/// Double hashing: position(i) = h1 + i * h2 mod m
fn positions(element: &[u8], k: usize, m: usize) -> impl Iterator<Item = usize> {
    let h1 = murmur(element, 0);
    let h2 = murmur(element, 1);
    let m = m as u64;

    (0..k as u64).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
}
