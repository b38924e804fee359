//! Recording backend for gate tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use crate::backend::Backend;
use crate::key::{normalize, Key};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(Key),
    Set(Key, String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("backend unavailable")]
pub struct BackendDown;

/// Stores values by canonical bytes and logs every call it receives.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    entries: Mutex<HashMap<Vec<u8>, String>>,
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with [`BackendDown`].
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get(_)))
            .count()
    }

    /// Writes directly, bypassing any gate in front of this backend.
    pub fn insert_raw(&self, key: &Key, value: &str) {
        let canonical = normalize(key).unwrap().into_owned();
        self.entries.lock().unwrap().insert(canonical, value.to_string());
    }
}

impl Backend for RecordingBackend {
    type Value = String;
    type Error = BackendDown;

    fn get(&self, key: &Key) -> Result<Option<String>, BackendDown> {
        self.calls.lock().unwrap().push(Call::Get(key.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendDown);
        }
        let canonical = normalize(key).unwrap();
        Ok(self.entries.lock().unwrap().get(canonical.as_ref()).cloned())
    }

    fn set(&self, key: Key, value: String) -> Result<(), BackendDown> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Set(key.clone(), value.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendDown);
        }
        let canonical = normalize(&key).unwrap().into_owned();
        self.entries.lock().unwrap().insert(canonical, value);
        Ok(())
    }
}
