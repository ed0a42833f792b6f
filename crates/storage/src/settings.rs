//! App settings stored as a single JSON object

use crate::kv::{self, KeyValueStore, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Key holding the settings object
pub const SETTINGS_KEY: &str = "settings";

/// Settings object: setting name to JSON value
pub type Settings = Map<String, Value>;

/// Device-local app settings
#[derive(Clone)]
pub struct SettingsStorage {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStorage {
    /// Wrap a store
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored settings, `None` when nothing has been saved yet
    pub async fn settings(&self) -> Result<Option<Settings>> {
        kv::get_json(self.kv.as_ref(), SETTINGS_KEY).await
    }

    /// Replace the whole settings object
    pub async fn set_settings(&self, settings: &Settings) -> Result<()> {
        kv::set_json(self.kv.as_ref(), SETTINGS_KEY, settings).await
    }

    /// Single setting decoded as `T`
    pub async fn setting<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = self
            .settings()
            .await?
            .and_then(|mut settings| settings.remove(key));

        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set one setting, keeping every other stored setting
    ///
    /// Returns the updated settings object.
    pub async fn update_setting<T>(&self, key: &str, value: &T) -> Result<Settings>
    where
        T: Serialize + ?Sized,
    {
        let mut settings = self.settings().await?.unwrap_or_default();
        settings.insert(key.to_string(), serde_json::to_value(value)?);

        self.set_settings(&settings).await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KvError, MemoryStore};
    use serde_json::json;

    fn storage() -> (SettingsStorage, MemoryStore) {
        let kv = MemoryStore::new();
        (SettingsStorage::new(Arc::new(kv.clone())), kv)
    }

    #[tokio::test]
    async fn test_settings_empty() {
        let (settings, _) = storage();

        assert!(settings.settings().await.unwrap().is_none());
        assert!(settings.setting::<bool>("darkMode").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_setting_merges() {
        let (settings, kv) = storage();

        settings.update_setting("darkMode", &true).await.unwrap();
        let updated = settings.update_setting("language", "ko").await.unwrap();

        assert_eq!(Value::Object(updated), json!({"darkMode": true, "language": "ko"}));
        assert_eq!(settings.setting::<bool>("darkMode").await.unwrap(), Some(true));
        assert_eq!(
            settings.setting::<String>("language").await.unwrap(),
            Some("ko".to_string())
        );

        let raw: Value = serde_json::from_str(&kv.get(SETTINGS_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(raw, json!({"darkMode": true, "language": "ko"}));
    }

    #[tokio::test]
    async fn test_update_setting_overwrites_same_key() {
        let (settings, _) = storage();

        settings.update_setting("fontSize", &14).await.unwrap();
        settings.update_setting("fontSize", &16).await.unwrap();

        assert_eq!(settings.setting::<u32>("fontSize").await.unwrap(), Some(16));
    }

    #[tokio::test]
    async fn test_set_settings_replaces_everything() {
        let (settings, _) = storage();
        settings.update_setting("darkMode", &true).await.unwrap();

        let mut replacement = Settings::new();
        replacement.insert("notifications".to_string(), json!(false));
        settings.set_settings(&replacement).await.unwrap();

        assert!(settings.setting::<bool>("darkMode").await.unwrap().is_none());
        assert_eq!(settings.setting::<bool>("notifications").await.unwrap(), Some(false));
    }

    #[tokio::test]
    async fn test_non_object_settings_is_an_error() {
        let kv = MemoryStore::with_entries([(SETTINGS_KEY, "[1,2]")]);
        let settings = SettingsStorage::new(Arc::new(kv));

        assert!(matches!(
            settings.update_setting("darkMode", &true).await,
            Err(KvError::Serialization(_))
        ));
    }
}
