// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without a host page.

use crowdfund_app_core::config::{ConfigError, ConfigStore, CLIENT_CONFIG_KEY};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// # Example
///
/// ```
/// use crowdfund_dry_tests::InMemoryConfigStore;
/// use crowdfund_app_core::config::ConfigService;
///
/// let store = InMemoryConfigStore::with_client_json(r#"{ "currency_symbol": "SEP" }"#);
/// let service = ConfigService::new(store.clone());
///
/// let config = service.load_client().unwrap();
/// assert_eq!(config.currency_symbol, "SEP");
/// assert_eq!(store.load_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<InMemoryConfigStoreInner>>,
}

#[derive(Default)]
struct InMemoryConfigStoreInner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty in-memory config store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `json` under the client config key.
    pub fn with_client_json(json: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .data
            .insert(CLIENT_CONFIG_KEY.to_string(), json.as_bytes().to_vec());
        store
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Number of `load_raw` attempts, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` calls.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Check if a key exists in the store.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryConfigStoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }

        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
