//! Access-token renewal
//!
//! Exchanges the stored refresh token for a new access token. The refresher
//! only talks to the server; persisting the result is left to the caller so
//! that the request layer decides what to store and when.

use crate::headers::default_headers;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use storage::AuthStorage;

/// Refresh request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Refresh response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Tokens issued by a successful refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    /// New access token (never empty)
    pub access_token: String,
    /// Rotated refresh token, if the server sent one
    pub refresh_token: Option<String>,
}

/// Calls the refresh endpoint with the stored refresh token
#[derive(Clone)]
pub struct TokenRefresher {
    http: ReqwestClient,
    url: String,
    auth: AuthStorage,
}

impl TokenRefresher {
    /// Create a refresher posting to `url`
    pub fn new(http: ReqwestClient, url: impl Into<String>, auth: AuthStorage) -> Self {
        Self {
            http,
            url: url.into(),
            auth,
        }
    }

    /// Refresh endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Obtain a new access token
    ///
    /// Returns `None` without touching the network when no refresh token is
    /// stored (or the store cannot be read), and `None` on any non-2xx status,
    /// transport error, or response without an `accessToken`.
    pub async fn refresh(&self) -> Option<RefreshedTokens> {
        let refresh_token = match self.auth.refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No refresh token stored, skipping refresh");
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read refresh token: {}", e);
                return None;
            }
        };

        let body = match serde_json::to_vec(&RefreshRequest { refresh_token: &refresh_token }) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to encode refresh request: {}", e);
                return None;
            }
        };

        let mut req = self.http.post(&self.url);
        for (key, value) in default_headers() {
            req = req.header(key, value);
        }

        tracing::debug!(url = %self.url, "Refreshing access token");
        let response = match req.body(body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Token refresh request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Token refresh rejected");
            return None;
        }

        let parsed = match response.json::<RefreshResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Failed to parse token refresh response: {}", e);
                return None;
            }
        };

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(access_token) => {
                tracing::debug!("Access token refreshed");
                Some(RefreshedTokens {
                    access_token,
                    refresh_token: parsed.refresh_token.filter(|t| !t.is_empty()),
                })
            }
            None => {
                tracing::warn!("Token refresh response did not include an access token");
                None
            }
        }
    }
}
