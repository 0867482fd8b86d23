//! File-backed snapshot store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::{StateStore, StoreError};

/// Snapshot store keeping one `<key>.json` file per key under a directory.
///
/// Every persist rewrites the whole file via a temp-file rename, so a
/// crash mid-write never leaves a truncated snapshot behind. Concurrent
/// writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, path = %path.display(), "Persisted snapshot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_store() -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!("lumina-store-{}", uuid::Uuid::new_v4()));
        JsonFileStore::open(dir).expect("open store")
    }

    #[test]
    fn survives_reopen() {
        let store = scratch_store();
        store
            .persist("cart", &json!([{ "id": "p1", "quantity": 2 }]))
            .expect("persist");

        let reopened = JsonFileStore::open(store.dir()).expect("reopen");
        let loaded = reopened.load("cart").expect("load").expect("present");
        assert_eq!(loaded[0]["quantity"], json!(2));

        fs::remove_dir_all(store.dir()).expect("cleanup");
    }

    #[test]
    fn missing_key_loads_none_and_removes_cleanly() {
        let store = scratch_store();
        assert!(store.load("orders").expect("load").is_none());
        store.remove("orders").expect("remove");

        fs::remove_dir_all(store.dir()).expect("cleanup");
    }

    #[test]
    fn persist_replaces_previous_snapshot() {
        let store = scratch_store();
        store.persist("user", &json!({ "name": "Ada" })).expect("persist");
        store.persist("user", &json!({ "name": "Grace" })).expect("persist");

        let loaded = store.load("user").expect("load").expect("present");
        assert_eq!(loaded["name"], json!("Grace"));

        fs::remove_dir_all(store.dir()).expect("cleanup");
    }
}
