//! Key-value store for tokens and small app records
//!
//! The rest of the workspace only sees the [`KeyValueStore`] trait: string keys,
//! string values, asynchronous get/set/remove. Writes are atomic per key and
//! there are no cross-key transactions. Two implementations are provided:
//! [`SledStore`] for durable on-device storage and [`MemoryStore`] for tests
//! and ephemeral sessions.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored bytes could not be read back as text
    #[error("Invalid value for key {key}: {reason}")]
    InvalidValue {
        /// Key whose value could not be decoded
        key: String,
        /// Decoder message
        reason: String,
    },
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Asynchronous string key-value store
///
/// Implementations must make each single-key write atomic. Concurrent writers
/// to the same key race with last-write-wins semantics.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Read a JSON-encoded value
///
/// Returns `Ok(None)` when the key is absent and a serialization error when the
/// stored text does not decode as `T`.
pub async fn get_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Store a value as JSON text
pub async fn set_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.set(key, &text).await
}

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "codingpt_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024,
            use_compression: false,
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Durable store backed by sled
///
/// Values are kept as raw UTF-8 bytes so the on-disk form matches what callers
/// wrote.
#[derive(Clone)]
pub struct SledStore {
    db: Arc<Db>,
}

impl SledStore {
    /// Open (or create) a store with configuration
    pub fn open(config: KvConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!(path = %config.path, "Opened key-value store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create a temporary store that is deleted on drop (for testing)
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for SledStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec()).map(Some).map_err(|e| {
                KvError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.db.remove(key.as_bytes())?;
        Ok(())
    }
}

/// In-memory store
///
/// Cloning shares the underlying map, so a test can hand one clone to the
/// client and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Arc::new(RwLock::new(map)) }
    }

    /// Copy of every entry currently stored
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
