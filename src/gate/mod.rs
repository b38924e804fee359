//! Gate Module
//!
//! Membership-gated decorator: a Bloom filter in front of any [`Backend`]
//! so reads of never-written keys skip the backend entirely.
//!
//! [`Backend`]: crate::backend::Backend

mod cache;
mod stats;

#[cfg(test)]
mod testing;

// Re-export public types
pub use cache::{GateConfig, GatedCache};
pub use stats::GateStats;
