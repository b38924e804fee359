//! Filter Parameters Module
//!
//! Sizes the bit array and hash count for a capacity and target rate:
//! - m = -n * ln(p) / ln(2)^2
//! - k = (m / n) * ln(2)

use std::f64::consts::LN_2;

use super::{DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE};
use crate::error::ConfigError;

/// Upper bound on the number of hash functions.
const MAX_HASH_COUNT: usize = 32;

/// Upper bound on the bit array size: 2^34 bits (a 2 GiB bitmap) on 64-bit
/// targets, the bit slice addressing limit on narrower ones.
pub const MAX_SIZE_BITS: usize = if usize::BITS < 64 {
    usize::MAX >> 3
} else {
    (1u64 << 34) as usize
};

// == Filter Params ==
/// Bloom filter dimensions derived from capacity and false-positive rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
}

impl Default for FilterParams {
    /// Dimensions for 1,000,000 elements at a 1% false-positive rate.
    fn default() -> Self {
        dimensions(DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE)
    }
}

/// Computes optimal filter dimensions.
///
/// Fails if `capacity` is zero, `false_positive_rate` is not strictly
/// between 0 and 1, or the resulting bit array exceeds [`MAX_SIZE_BITS`].
pub fn optimal_parameters(
    capacity: usize,
    false_positive_rate: f64,
) -> Result<FilterParams, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::ZeroCapacity);
    }
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(ConfigError::InvalidFalsePositiveRate(false_positive_rate));
    }

    let required_bits = required_bits(capacity, false_positive_rate);
    if !required_bits.is_finite() || required_bits > MAX_SIZE_BITS as f64 {
        return Err(ConfigError::FilterTooLarge {
            capacity,
            required_bits,
            max_bits: MAX_SIZE_BITS,
        });
    }

    Ok(dimensions(capacity, false_positive_rate))
}

fn required_bits(capacity: usize, false_positive_rate: f64) -> f64 {
    (-(capacity as f64) * false_positive_rate.ln() / (LN_2 * LN_2)).ceil()
}

fn dimensions(capacity: usize, false_positive_rate: f64) -> FilterParams {
    let n = capacity as f64;
    let m = (required_bits(capacity, false_positive_rate) as usize).max(1);
    let k = ((m as f64 / n) * LN_2).round() as usize;

    FilterParams {
        size_bits: m,
        hash_count: k.clamp(1, MAX_HASH_COUNT),
    }
}

/// Estimated false-positive rate after `n` insertions: (1 - e^(-kn/m))^k
pub fn estimated_fpr(size_bits: usize, hash_count: usize, n: usize) -> f64 {
    if size_bits == 0 {
        return 1.0;
    }
    let exponent = -(hash_count as f64) * (n as f64) / (size_bits as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizing() {
        // 1M elements at 1%: ~9.59M bits, 7 hash functions
        let params = optimal_parameters(1_000_000, 0.01).unwrap();
        assert!(params.size_bits > 9_500_000 && params.size_bits < 9_700_000);
        assert_eq!(params.hash_count, 7);
    }

    #[test]
    fn test_default_matches_default_constants() {
        assert_eq!(
            FilterParams::default(),
            optimal_parameters(DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE).unwrap()
        );
    }

    #[test]
    fn test_small_sizing() {
        let params = optimal_parameters(100, 0.01).unwrap();
        assert!(params.size_bits >= 900 && params.size_bits <= 1000);
        assert!((5..=9).contains(&params.hash_count));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert_eq!(optimal_parameters(0, 0.01), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_rejects_bad_rates() {
        for rate in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            assert!(matches!(
                optimal_parameters(10, rate),
                Err(ConfigError::InvalidFalsePositiveRate(_))
            ));
        }
    }

    #[test]
    fn test_rejects_oversized_filter() {
        match optimal_parameters(usize::MAX, 0.01) {
            Err(ConfigError::FilterTooLarge {
                capacity, max_bits, ..
            }) => {
                assert_eq!(capacity, usize::MAX);
                assert_eq!(max_bits, MAX_SIZE_BITS);
            }
            other => panic!("expected FilterTooLarge, got {:?}", other),
        }

        // A tiny rate blows up an otherwise modest capacity too
        assert!(matches!(
            optimal_parameters(1_000_000_000, f64::MIN_POSITIVE),
            Err(ConfigError::FilterTooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_filter_fits_limit() {
        // ~9.59 bits per element at 1%
        let capacity = MAX_SIZE_BITS / 10;
        let params = optimal_parameters(capacity, 0.01).unwrap();
        assert!(params.size_bits <= MAX_SIZE_BITS);
        assert_eq!(params.hash_count, 7);
    }

    #[test]
    fn test_estimated_fpr_at_capacity() {
        let params = optimal_parameters(10_000, 0.01).unwrap();
        let fpr = estimated_fpr(params.size_bits, params.hash_count, 10_000);
        assert!(fpr <= 0.011, "estimated fpr {} above target", fpr);
        assert_eq!(estimated_fpr(params.size_bits, params.hash_count, 0), 0.0);
    }
}
