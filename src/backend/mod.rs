//! Backend Module
//!
//! The key-value capability the gate decorates, plus a minimal in-memory
//! implementation used by the server binary and the tests.

mod memory;

use std::sync::Arc;

use crate::key::Key;

// Re-export public types
pub use memory::{MemoryBackend, StoreError, MAX_VALUE_SIZE};

// == Backend Trait ==
/// A key-value store reachable through `get` and `set`.
///
/// `get` returning `Ok(None)` means "no value, no error". Implementations
/// take `&self` and handle their own synchronization.
pub trait Backend {
    /// Stored value type
    type Value;
    /// Failure type, opaque to the gate
    type Error;

    fn get(&self, key: &Key) -> Result<Option<Self::Value>, Self::Error>;

    fn set(&self, key: Key, value: Self::Value) -> Result<(), Self::Error>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Value = B::Value;
    type Error = B::Error;

    fn get(&self, key: &Key) -> Result<Option<Self::Value>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: Key, value: Self::Value) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    type Value = B::Value;
    type Error = B::Error;

    fn get(&self, key: &Key) -> Result<Option<Self::Value>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: Key, value: Self::Value) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    type Value = B::Value;
    type Error = B::Error;

    fn get(&self, key: &Key) -> Result<Option<Self::Value>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: Key, value: Self::Value) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}
