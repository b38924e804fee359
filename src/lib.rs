//! Bloom Gate - A membership-gated cache decorator
//!
//! Puts a Bloom filter in front of any key-value backend so lookups for keys
//! that were never written are answered locally, without backend I/O.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod key;
pub mod models;

pub use api::AppState;
pub use backend::{Backend, MemoryBackend};
pub use config::Config;
pub use error::{ConfigError, GateError};
pub use gate::{GateConfig, GateStats, GatedCache};
pub use key::{normalize, Key, KeyKind};
