//! In-memory snapshot store, primarily for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{StateStore, StoreError};

/// Snapshot store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.get(key).cloned())
    }

    fn persist(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.remove(key);
        Ok(())
    }
}
