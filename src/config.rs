//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::filter::{DEFAULT_CAPACITY, DEFAULT_FALSE_POSITIVE_RATE};
use crate::gate::GateConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Expected number of distinct keys the membership filter is sized for
    pub filter_capacity: usize,
    /// Target false-positive rate of the membership filter
    pub filter_fp_rate: f64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FILTER_CAPACITY` - Expected distinct keys (default: 1000000)
    /// - `FILTER_FP_RATE` - Target false-positive rate (default: 0.01)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            filter_capacity: env_or("FILTER_CAPACITY", defaults.filter_capacity),
            filter_fp_rate: env_or("FILTER_FP_RATE", defaults.filter_fp_rate),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Filter sizing for the membership gate.
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            capacity: self.filter_capacity,
            false_positive_rate: self.filter_fp_rate,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter_capacity: DEFAULT_CAPACITY,
            filter_fp_rate: DEFAULT_FALSE_POSITIVE_RATE,
            server_port: 3000,
        }
    }
}
