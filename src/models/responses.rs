//! Response DTOs for the gated cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::filter::MembershipFilter;
use crate::gate::GateStats;

/// Response body for the GET operations (GET /get/:key, POST /get)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key, in canonical text form
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
///
/// Combines gate routing counters with membership filter state.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Gate routing counters, serialized at the top level
    #[serde(flatten)]
    pub stats: GateStats,
    /// Fraction of lookups answered locally
    pub short_circuit_rate: f64,
    /// Membership filter state
    pub filter: FilterSummary,
}

/// Membership filter dimensions and fill level
#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    pub size_bits: usize,
    pub hash_count: usize,
    pub elements_added: usize,
    pub bits_set: usize,
    pub estimated_fpr: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from gate statistics and filter state
    pub fn new(stats: &GateStats, filter: &MembershipFilter) -> Self {
        Self {
            stats: stats.clone(),
            short_circuit_rate: stats.short_circuit_rate(),
            filter: FilterSummary {
                size_bits: filter.size_bits(),
                hash_count: filter.hash_count(),
                elements_added: filter.elements_added(),
                bits_set: filter.bits_set(),
                estimated_fpr: filter.estimated_fpr(),
            },
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
