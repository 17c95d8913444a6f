// ── Runtime client configuration ──
//
// Describes *where* the API lives and *which* data source search uses.
// Built by `pricepulse-config` (or tests) and handed in; core never reads
// config files.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::model::Store;

/// The placeholder API key shipped in sample configuration. Seeing it means
/// the user never configured a real key.
pub const DEMO_API_KEY_SENTINEL: &str = "YOUR_API_KEY";

/// Which data source the search repository uses. Decided once at startup.
#[derive(Debug, Clone)]
pub enum DataMode {
    /// Call the search API with this key.
    Live { api_key: SecretString },
    /// Serve the built-in fixture; no network.
    Demo,
}

impl DataMode {
    /// Demo when the credential is missing, blank, or the sentinel.
    pub fn from_credential(api_key: Option<SecretString>) -> Self {
        match api_key {
            Some(key)
                if !key.expose_secret().trim().is_empty()
                    && key.expose_secret() != DEMO_API_KEY_SENTINEL =>
            {
                Self::Live { api_key: key }
            }
            _ => Self::Demo,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

/// Everything the repositories need to talk to PricePulse.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `http://127.0.0.1:8000/`.
    pub base_url: Url,
    pub timeout: Duration,
    pub data_mode: DataMode,
    /// Stores the search API is asked to cover.
    pub stores: Vec<Store>,
}

impl ClientConfig {
    /// A config with the default timeout, every store, and demo search.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: pricepulse_api::transport::DEFAULT_TIMEOUT,
            data_mode: DataMode::Demo,
            stores: Store::all(),
        }
    }

    pub fn with_data_mode(mut self, data_mode: DataMode) -> Self {
        self.data_mode = data_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Option<SecretString> {
        Some(SecretString::from(s.to_owned()))
    }

    #[test]
    fn sentinel_selects_demo() {
        assert!(DataMode::from_credential(key("YOUR_API_KEY")).is_demo());
    }

    #[test]
    fn missing_or_blank_key_selects_demo() {
        assert!(DataMode::from_credential(None).is_demo());
        assert!(DataMode::from_credential(key("   ")).is_demo());
    }

    #[test]
    fn real_key_selects_live() {
        let mode = DataMode::from_credential(key("pp-live-123"));
        match mode {
            DataMode::Live { api_key } => assert_eq!(api_key.expose_secret(), "pp-live-123"),
            DataMode::Demo => panic!("expected live mode"),
        }
    }
}
