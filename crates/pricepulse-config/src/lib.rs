//! Shared configuration for PricePulse front-ends.
//!
//! TOML file + environment layering, API key resolution (env + plaintext),
//! and translation to `pricepulse_core::ClientConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pricepulse_core::{ClientConfig, DEMO_API_KEY_SENTINEL, DataMode, Store};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub search: SearchSection,
}

/// Where the PricePulse API lives and how to authenticate search.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Search API key (plaintext; prefer `api_key_env`).
    pub api_key: Option<String>,

    /// Environment variable name containing the search API key.
    pub api_key_env: Option<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            api_key: Some(DEMO_API_KEY_SENTINEL.into()),
            api_key_env: Some("PRICEPULSE_API_KEY".into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSection {
    /// Stores the search API is asked to cover.
    #[serde(default = "default_stores")]
    pub stores: Vec<String>,

    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            stores: default_stores(),
            default_category: default_category(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".into()
}
fn default_timeout() -> u64 {
    15
}
fn default_stores() -> Vec<String> {
    Store::all().iter().map(ToString::to_string).collect()
}
fn default_category() -> String {
    pricepulse_core::DEFAULT_CATEGORY.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pricepulse", "pricepulse").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("pricepulse");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `PRICEPULSE_*` env vars.
///
/// Nested keys use a double underscore: `PRICEPULSE_API__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PRICEPULSE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write the default config to the canonical path on first run.
///
/// Returns the path when a file was created, `None` if one already exists.
/// The defaults carry the `YOUR_API_KEY` placeholder, so search stays in
/// demo mode until the user fills in a real key.
pub fn ensure_config() -> Result<Option<PathBuf>, ConfigError> {
    ensure_config_at(&config_path())
}

pub fn ensure_config_at(path: &Path) -> Result<Option<PathBuf>, ConfigError> {
    if path.exists() {
        return Ok(None);
    }
    save_config_to(&Config::default(), path)?;
    Ok(Some(path.to_path_buf()))
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the search API key: `api_key_env` variable, then plaintext.
///
/// `None` means no key at all; the sentinel is returned as-is and turned
/// into demo mode by [`DataMode::from_credential`].
pub fn resolve_api_key(api: &ApiSection) -> Option<SecretString> {
    resolve_api_key_with(api, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    api: &ApiSection,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    // 1. Env var named by the config
    if let Some(value) = api
        .api_key_env
        .as_deref()
        .and_then(&lookup)
        .filter(|v| !v.trim().is_empty())
    {
        return Some(SecretString::from(value));
    }

    // 2. Plaintext in config
    api.api_key.clone().map(SecretString::from)
}

// ── ClientConfig ────────────────────────────────────────────────────

impl Config {
    /// Validate and build the core `ClientConfig`.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let data_mode = DataMode::from_credential(resolve_api_key(&self.api));
        self.build_client_config(data_mode)
    }

    fn build_client_config(&self, data_mode: DataMode) -> Result<ClientConfig, ConfigError> {
        let base_url: url::Url =
            self.api
                .base_url
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "api.base_url".into(),
                    reason: format!("invalid URL: {}", self.api.base_url),
                })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api.base_url".into(),
                reason: format!("expected http or https, got '{}'", base_url.scheme()),
            });
        }

        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let stores = self
            .search
            .stores
            .iter()
            .map(|name| {
                name.parse::<Store>().map_err(|_| ConfigError::Validation {
                    field: "search.stores".into(),
                    reason: format!("unknown store '{name}'"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if stores.is_empty() {
            return Err(ConfigError::Validation {
                field: "search.stores".into(),
                reason: "at least one store is required".into(),
            });
        }

        let mut config = ClientConfig::new(normalize_base_url(base_url)).with_data_mode(data_mode);
        config.timeout = Duration::from_secs(self.api.timeout);
        config.stores = stores;
        Ok(config)
    }
}

fn normalize_base_url(mut url: url::Url) -> url::Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_point_at_local_backend_in_demo_mode() {
        let cfg = Config::default();
        let client = cfg
            .build_client_config(DataMode::from_credential(cfg.api.api_key.clone().map(SecretString::from)))
            .unwrap();

        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(client.timeout, Duration::from_secs(15));
        assert!(client.data_mode.is_demo());
        assert_eq!(client.stores, Store::all());
    }

    #[test]
    fn loads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://pricepulse.example/api"
timeout = 5
api_key = "pp-live-123"

[search]
stores = ["Amazon", "myntra"]
default_category = "Footwear"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.search.default_category, "Footwear");

        let client = cfg
            .build_client_config(DataMode::from_credential(
                resolve_api_key_with(&cfg.api, |_| None),
            ))
            .unwrap();
        assert_eq!(client.base_url.as_str(), "https://pricepulse.example/api/");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.stores, vec![Store::Amazon, Store::Myntra]);
        assert!(!client.data_mode.is_demo());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.api.timeout, 15);
        assert_eq!(cfg.search.stores, vec!["amazon", "flipkart", "myntra"]);
    }

    #[test]
    fn save_then_load_preserves_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.api.base_url = "http://10.0.0.5:8000/".into();
        cfg.search.stores = vec!["flipkart".into()];

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.api.base_url, "http://10.0.0.5:8000/");
        assert_eq!(loaded.search.stores, vec!["flipkart"]);
        assert_eq!(loaded.api.api_key.as_deref(), Some(DEMO_API_KEY_SENTINEL));
    }

    #[test]
    fn first_run_writes_placeholder_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricepulse").join("config.toml");

        assert_eq!(ensure_config_at(&path).unwrap(), Some(path.clone()));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(DEMO_API_KEY_SENTINEL));
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:8000/");
        assert_eq!(cfg.search.default_category, pricepulse_core::DEFAULT_CATEGORY);
    }

    #[test]
    fn existing_config_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"https://mine.example/\"\n").unwrap();

        assert_eq!(ensure_config_at(&path).unwrap(), None);
        assert_eq!(
            load_config_from(&path).unwrap().api.base_url,
            "https://mine.example/"
        );
    }

    #[test]
    fn env_var_key_beats_plaintext() {
        let api = ApiSection {
            api_key: Some("from-file".into()),
            api_key_env: Some("PP_TEST_KEY".into()),
            ..ApiSection::default()
        };

        let key = resolve_api_key_with(&api, |name| {
            (name == "PP_TEST_KEY").then(|| "from-env".to_owned())
        });
        assert_eq!(key.unwrap().expose_secret(), "from-env");

        let key = resolve_api_key_with(&api, |_| None);
        assert_eq!(key.unwrap().expose_secret(), "from-file");
    }

    #[test]
    fn no_key_anywhere_is_none() {
        let api = ApiSection {
            api_key: None,
            api_key_env: None,
            ..ApiSection::default()
        };
        assert!(resolve_api_key_with(&api, |_| None).is_none());
    }

    #[test]
    fn rejects_unknown_store() {
        let mut cfg = Config::default();
        cfg.search.stores = vec!["amazon".into(), "ebay".into()];
        let err = cfg.build_client_config(DataMode::Demo).unwrap_err();
        assert!(err.to_string().contains("ebay"), "got: {err}");
    }

    #[test]
    fn rejects_non_http_url_and_zero_timeout() {
        let mut cfg = Config::default();
        cfg.api.base_url = "ftp://example.com/".into();
        assert!(cfg.build_client_config(DataMode::Demo).is_err());

        let mut cfg = Config::default();
        cfg.api.timeout = 0;
        assert!(cfg.build_client_config(DataMode::Demo).is_err());
    }
}
