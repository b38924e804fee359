//! Filter Module
//!
//! Bloom filter backing the membership gate: parameter sizing, the bit array
//! itself, and a thread-safe wrapper shared by concurrent callers.

mod bloom;
mod membership;
mod params;

// Re-export public types
pub use bloom::BloomFilter;
pub use membership::MembershipFilter;
pub use params::{estimated_fpr, optimal_parameters, FilterParams, MAX_SIZE_BITS};

// == Public Constants ==
/// Expected number of distinct keys the filter is sized for
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Target false-positive probability at capacity
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;
