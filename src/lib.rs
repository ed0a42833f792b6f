//! CodingPT client core
//!
//! Composition root: reads configuration from the environment, opens the
//! on-device store, and wires the API client and app services together.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::Context;
use api_client::{ApiClient, ApiClientConfig};
use app_core::{AuthSession, LessonCatalog};
use std::sync::Arc;
use std::time::Duration;
use storage::{KeyValueStore, KvConfig, SettingsStorage, SledStore};
use tracing_subscriber::EnvFilter;

pub use api_client;
pub use app_core;
pub use storage;

/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "CODINGPT_API_URL";

/// Environment variable holding the store path
pub const ENV_STORE_PATH: &str = "CODINGPT_STORE_PATH";

/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CODINGPT_TIMEOUT_SECS";

/// Environment variable holding the log filter
pub const ENV_LOG: &str = "CODINGPT_LOG";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// API client settings
    pub api: ApiClientConfig,
    /// Store settings
    pub store: KvConfig,
}

impl AppConfig {
    /// Build from `CODINGPT_*` environment variables, falling back to defaults
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            config.api.base_url = url;
        }

        if let Some(path) = lookup(ENV_STORE_PATH).filter(|v| !v.is_empty()) {
            config.store.path = path;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, secs
                )
            })?;
            config.api.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Wired application services
#[derive(Clone)]
pub struct App {
    /// Authenticated API client
    pub client: ApiClient,
    /// Login, session check and logout
    pub session: AuthSession,
    /// Lessons with local progress
    pub lessons: LessonCatalog,
    /// Device-local app settings
    pub settings: SettingsStorage,
}

impl App {
    /// Open the sled store and wire everything together
    pub fn bootstrap(config: AppConfig) -> anyhow::Result<Self> {
        let store = SledStore::open(config.store.clone())
            .with_context(|| format!("failed to open store at {}", config.store.path))?;
        Self::with_store(config.api, Arc::new(store))
    }

    /// Wire the services over an already-open store
    pub fn with_store(api: ApiClientConfig, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let base_url = api.base_url.clone();
        let settings = SettingsStorage::new(store.clone());
        let client = ApiClient::new(api, store).context("failed to build API client")?;

        tracing::info!(base_url = %base_url, "CodingPT client ready");

        Ok(Self {
            session: AuthSession::new(client.clone()),
            lessons: LessonCatalog::new(client.clone()),
            settings,
            client,
        })
    }
}

/// Install the global tracing subscriber
///
/// The filter comes from `CODINGPT_LOG`, then `RUST_LOG`, then `info`.
/// Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.api.base_url, "https://api.codingpt.com");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.store.path, "codingpt_kv.db");
    }

    #[test]
    fn test_config_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:4000"),
            (ENV_STORE_PATH, "/tmp/codingpt.db"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.store.path, "/tmp/codingpt.db");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_bootstrap_rejects_bad_base_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.api.base_url = "::not a url::".to_string();
        config.store.path = dir.path().join("kv.db").to_string_lossy().to_string();

        assert!(App::bootstrap(config).is_err());
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }
}
