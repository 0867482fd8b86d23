//! Language preference.

use std::sync::Arc;

use crate::store::{self, StateStore, StoreError, keys};

/// Default UI language when no preference was ever saved.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reads and writes the preferred-language snapshot.
#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn StateStore>,
}

impl PreferenceService {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    pub fn language(&self) -> Result<String, StoreError> {
        Ok(store::load_as(self.store.as_ref(), keys::PREFERRED_LANGUAGE)?
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()))
    }

    pub fn set_language(&self, language: &str) -> Result<(), StoreError> {
        store::persist_as(self.store.as_ref(), keys::PREFERRED_LANGUAGE, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_to_english_until_set() {
        let prefs = PreferenceService::new(Arc::new(MemoryStore::new()));
        assert_eq!(prefs.language().expect("language"), "en");

        prefs.set_language("de").expect("set");
        assert_eq!(prefs.language().expect("language"), "de");
    }
}
