//! Credential and cached-user storage
//!
//! Fixed keys for the access token, refresh token and the JSON-serialized user
//! record. Nothing here caches values in memory; every accessor goes to the
//! underlying [`KeyValueStore`].

use crate::kv::{self, KeyValueStore, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

/// Key holding the bearer access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Key holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Key holding the cached user record (JSON text)
pub const USER_DATA_KEY: &str = "userData";

/// Access and refresh token issued together at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    /// Short-lived bearer credential
    pub access_token: String,
    /// Longer-lived credential used only to obtain new access tokens
    pub refresh_token: String,
}

impl CredentialPair {
    /// Create a credential pair
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Typed access to the auth-related keys
#[derive(Clone)]
pub struct AuthStorage {
    kv: Arc<dyn KeyValueStore>,
}

impl AuthStorage {
    /// Wrap a store
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    /// Stored access token; an empty string counts as absent
    pub async fn access_token(&self) -> Result<Option<String>> {
        Ok(non_empty(self.kv.get(ACCESS_TOKEN_KEY).await?))
    }

    /// Replace the stored access token
    pub async fn set_access_token(&self, token: &str) -> Result<()> {
        self.kv.set(ACCESS_TOKEN_KEY, token).await
    }

    /// Stored refresh token; an empty string counts as absent
    pub async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(non_empty(self.kv.get(REFRESH_TOKEN_KEY).await?))
    }

    /// Replace the stored refresh token
    pub async fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.kv.set(REFRESH_TOKEN_KEY, token).await
    }

    /// Persist both tokens
    ///
    /// The two writes are independent; a failure on the second leaves the first
    /// in place.
    pub async fn set_credentials(&self, credentials: &CredentialPair) -> Result<()> {
        self.set_access_token(&credentials.access_token).await?;
        self.set_refresh_token(&credentials.refresh_token).await
    }

    /// Both tokens, if both are present
    pub async fn credentials(&self) -> Result<Option<CredentialPair>> {
        let access = self.access_token().await?;
        let refresh = self.refresh_token().await?;
        Ok(access.zip(refresh).map(|(a, r)| CredentialPair::new(a, r)))
    }

    /// Remove both tokens
    pub async fn clear_credentials(&self) -> Result<()> {
        self.kv.remove(ACCESS_TOKEN_KEY).await?;
        self.kv.remove(REFRESH_TOKEN_KEY).await
    }

    /// Cached user record exactly as stored, without validation
    pub async fn user_record_raw(&self) -> Result<Option<String>> {
        self.kv.get(USER_DATA_KEY).await
    }

    /// Cached user record decoded as `T`
    pub async fn user_record<T>(&self) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        kv::get_json(self.kv.as_ref(), USER_DATA_KEY).await
    }

    /// Replace the cached user record
    pub async fn set_user_record<T>(&self, user: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        kv::set_json(self.kv.as_ref(), USER_DATA_KEY, user).await
    }

    /// Remove the cached user record
    pub async fn clear_user_record(&self) -> Result<()> {
        self.kv.remove(USER_DATA_KEY).await
    }

    /// Remove every piece of auth state (both tokens and the user record)
    pub async fn logout(&self) -> Result<()> {
        self.clear_credentials().await?;
        self.clear_user_record().await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
