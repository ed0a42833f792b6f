//! Session flows for CodingPT
//!
//! This module provides the high-level login, session check, logout and
//! profile flows. Tokens and the cached user record live in the injected
//! store; this service keeps no state of its own.

use api_client::services::{LoginResponse, ProfileUpdate, UserRecord, UserStats};
use api_client::ApiClient;
use serde::{Deserialize, Serialize};
use storage::{AuthStorage, CredentialPair, KvError};
use thiserror::Error;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server rejected the call
    #[error("API error: {0}")]
    Api(#[from] api_client::Error),

    /// Local storage error
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Login succeeded on the server but returned no usable tokens
    #[error("Invalid login response: {0}")]
    InvalidLoginResponse(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Outcome of a session check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginState {
    /// Whether the stored credentials are accepted by the server
    pub logged_in: bool,
    /// Current user's id, when the server reported one
    pub user_id: Option<i64>,
}

impl LoginState {
    /// Logged-out state
    pub fn logged_out() -> Self {
        Self::default()
    }
}

/// Authentication service
///
/// # Example
///
/// ```rust,no_run
/// use api_client::{ApiClient, ApiClientConfig};
/// use app_core::session::AuthSession;
/// use std::sync::Arc;
/// use storage::{KvConfig, SledStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SledStore::open(KvConfig::new("codingpt_kv.db"))?;
///     let client = ApiClient::new(ApiClientConfig::default(), Arc::new(store))?;
///     let session = AuthSession::new(client);
///
///     let state = session.check_logged_in().await;
///     if !state.logged_in {
///         session.login("google-id-token").await?;
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthSession {
    client: ApiClient,
}

impl AuthSession {
    /// Create a session service over an API client
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Underlying API client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn storage(&self) -> &AuthStorage {
        self.client.auth_storage()
    }

    /// Login with an identity-provider ID token
    ///
    /// Persists both tokens and, when the server returns one, the user record.
    ///
    /// # Errors
    ///
    /// - `SessionError::Api` - the server rejected the token
    /// - `SessionError::InvalidLoginResponse` - a token in the response is empty
    /// - `SessionError::Storage` - the tokens could not be saved
    pub async fn login(&self, id_token: &str) -> Result<LoginResponse> {
        let login = self.client.auth().login(id_token).await.into_result()?;

        if login.access_token.is_empty() || login.refresh_token.is_empty() {
            return Err(SessionError::InvalidLoginResponse(
                "missing access or refresh token".to_string(),
            ));
        }

        self.storage()
            .set_credentials(&CredentialPair::new(&login.access_token, &login.refresh_token))
            .await?;

        if let Some(user) = &login.user {
            self.storage().set_user_record(user).await?;
        }

        tracing::info!("Logged in");
        Ok(login)
    }

    /// Verify the stored session with the server
    ///
    /// Makes no network call when neither token is stored. Any failure
    /// (including a storage read error) is reported as logged out.
    pub async fn check_logged_in(&self) -> LoginState {
        match self.has_stored_tokens().await {
            Ok(true) => {}
            Ok(false) => return LoginState::logged_out(),
            Err(e) => {
                tracing::warn!("Failed to read stored tokens: {}", e);
                return LoginState::logged_out();
            }
        }

        let response = self.client.auth().check_session().await;
        match response.into_data() {
            Some(status) => LoginState {
                logged_in: true,
                user_id: status.user_id(),
            },
            None => LoginState::logged_out(),
        }
    }

    async fn has_stored_tokens(&self) -> Result<bool> {
        let access = self.storage().access_token().await?;
        let refresh = self.storage().refresh_token().await?;
        Ok(access.is_some() || refresh.is_some())
    }

    /// Logout
    ///
    /// Tells the server first, then clears both tokens and the cached user
    /// record whether or not the server call succeeded.
    pub async fn logout(&self) -> Result<()> {
        let response = self.client.auth().logout().await;
        if let Some(error) = response.error() {
            tracing::warn!("Server logout failed, clearing local session anyway: {}", error);
        }

        self.storage().logout().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Cached user record, if any
    pub async fn stored_user(&self) -> Result<Option<UserRecord>> {
        Ok(self.storage().user_record().await?)
    }

    /// Fetch the profile from the server and refresh the cached record
    pub async fn fetch_profile(&self) -> Result<UserRecord> {
        let user = self.client.user().profile().await.into_result()?;
        self.storage().set_user_record(&user).await?;
        Ok(user)
    }

    /// Learning statistics from a freshly fetched profile
    ///
    /// The cached user record is refreshed as a side effect.
    pub async fn stats(&self) -> Result<UserStats> {
        Ok(self.fetch_profile().await?.stats())
    }

    /// Update the profile and refresh the cached record on success
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserRecord> {
        let user = self.client.user().update_profile(update).await.into_result()?;
        self.storage().set_user_record(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::ApiClientConfig;
    use std::sync::Arc;
    use storage::MemoryStore;

    fn session(store: MemoryStore) -> AuthSession {
        // Unroutable base URL; these tests never reach the network
        let config = ApiClientConfig::new("http://127.0.0.1:9");
        let client = ApiClient::new(config, Arc::new(store)).unwrap();
        AuthSession::new(client)
    }

    #[tokio::test]
    async fn test_check_logged_in_without_tokens() {
        let session = session(MemoryStore::new());

        assert_eq!(session.check_logged_in().await, LoginState::logged_out());
    }

    #[tokio::test]
    async fn test_stored_user_empty() {
        let session = session(MemoryStore::new());

        assert!(session.stored_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_user_malformed() {
        let session = session(MemoryStore::with_entries([("userData", "{oops")]));

        assert!(matches!(session.stored_user().await, Err(SessionError::Storage(_))));
    }

    #[test]
    fn test_login_state_wire_names() {
        let json = serde_json::to_string(&LoginState {
            logged_in: true,
            user_id: Some(7),
        })
        .unwrap();
        assert_eq!(json, r#"{"loggedIn":true,"userId":7}"#);
    }
}
