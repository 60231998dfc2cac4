// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service, storage port, and the client's own settings.

use crowdfund_abi::{address, Address};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Key under which [`ClientConfig`] is stored.
pub const CLIENT_CONFIG_KEY: &str = "client";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Store a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Loaded values are unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that serializes config values and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and store a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Load the [`ClientConfig`], falling back to defaults when absent, and validate it.
    pub fn load_client(&self) -> Result<ClientConfig, ConfigError> {
        let config = self
            .load::<ClientConfig>(CLIENT_CONFIG_KEY)?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}

/// Settings for one client instance.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Deployed factory contract.
    pub factory_address: Address,
    /// Block explorer root; address pages live at `<base>/address/<addr>`.
    pub explorer_base_url: String,
    /// Symbol shown next to decimal amounts.
    pub currency_symbol: String,
    /// Delay between receipt polls while waiting for confirmation.
    pub receipt_poll_interval_ms: u64,
    /// Lifetime of a toast.
    pub toast_ttl_ms: u64,
    /// Maximum queued toasts; the oldest is dropped first.
    pub max_toasts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            factory_address: address!("e1eB0742F16a1DC6DB40e3ed78ce6c1394515A1F"),
            explorer_base_url: "https://sepolia.etherscan.io".to_string(),
            currency_symbol: "ETH".to_string(),
            receipt_poll_interval_ms: 1_000,
            toast_ttl_ms: 6_000,
            max_toasts: 4,
        }
    }
}

impl ClientConfig {
    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.explorer_base_url.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "explorer_base_url must be an http(s) URL, got {base:?}"
            )));
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "receipt_poll_interval_ms must be positive".into(),
            ));
        }
        if self.max_toasts == 0 {
            return Err(ConfigError::Invalid("max_toasts must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "currency_symbol": "SEP" }"#).unwrap();
        assert_eq!(config.currency_symbol, "SEP");
        assert_eq!(config.factory_address, ClientConfig::default().factory_address);
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let config = ClientConfig {
            receipt_poll_interval_ms: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_http_explorer() {
        let config = ClientConfig {
            explorer_base_url: "javascript:alert(1)".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
