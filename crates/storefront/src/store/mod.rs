//! Persistent per-browser state.
//!
//! Cart, orders, the signed-in user, and the language preference live in a
//! key/value snapshot store: each key holds one JSON document, rewritten
//! in full on every change, read back on startup. Last write wins; there
//! is no cross-process coordination.
//!
//! [`StateStore`] is the seam: production uses [`JsonFileStore`] (one file
//! per key under a directory), tests use [`MemoryStore`].

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Well-known snapshot keys.
pub mod keys {
    /// Cart items for the current browser.
    pub const CART: &str = "cart";
    /// Order history, newest first.
    pub const ORDERS: &str = "orders";
    /// The currently signed-in user, if any.
    pub const USER: &str = "user";
    /// All registered accounts with their password hashes.
    pub const USERS: &str = "users";
    /// UI language preference.
    pub const PREFERRED_LANGUAGE: &str = "preferredLanguage";
}

/// Errors from the snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A key/value store of JSON snapshots.
pub trait StateStore: Send + Sync {
    /// Read the snapshot under `key`, or `None` if never written.
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the snapshot under `key`.
    fn persist(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Delete the snapshot under `key`. Deleting a missing key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Load and deserialize the snapshot under `key`.
pub fn load_as<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.load(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and persist `value` under `key`.
pub fn persist_as<T: Serialize + ?Sized>(
    store: &dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.persist(key, &serde_json::to_value(value)?)
}
