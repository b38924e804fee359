//! Memory Backend Module
//!
//! A plain map behind a lock. Entries are identified by the key's canonical
//! bytes, so keys the gate treats as equal are equal here too.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use super::Backend;
use crate::key::{Key, KeyKind};

// == Public Constants ==
/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Store Error ==
/// Errors reported by [`MemoryBackend`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Value of {size} bytes exceeds maximum size of {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    #[error("Key type {0} cannot be stored")]
    UnsupportedKey(KeyKind),

    #[error("Store lock poisoned")]
    Poisoned,
}

// == Memory Backend ==
/// In-process string store.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<Vec<u8>, String>>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Vec<u8>, String>>, StoreError> {
        self.entries.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Vec<u8>, String>>, StoreError> {
        self.entries.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Backend for MemoryBackend {
    type Value = String;
    type Error = StoreError;

    fn get(&self, key: &Key) -> Result<Option<String>, StoreError> {
        let canonical = key
            .canonical_bytes()
            .ok_or(StoreError::UnsupportedKey(key.kind()))?;
        Ok(self.read()?.get(canonical.as_ref()).cloned())
    }

    fn set(&self, key: Key, value: String) -> Result<(), StoreError> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::ValueTooLarge {
                size: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }

        let canonical = key
            .canonical_bytes()
            .ok_or(StoreError::UnsupportedKey(key.kind()))?
            .into_owned();
        self.write()?.insert(canonical, value);
        Ok(())
    }
}
