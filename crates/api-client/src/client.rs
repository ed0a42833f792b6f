//! Authenticated request layer
//!
//! [`ApiClient::request`] sends a request with headers built from the stored
//! access token. When the server answers 401 it asks the [`TokenRefresher`]
//! for a new access token, persists it, and sends the request exactly once
//! more. Every outcome is folded into an [`ApiResponse`].

use crate::headers::{build_headers, overlay_headers};
use crate::refresh::{RefreshedTokens, TokenRefresher};
use crate::request::{ApiRequest, HttpMethod};
use crate::response::ApiResponse;
use crate::{Error, Result};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use storage::{AuthStorage, KeyValueStore};

/// Message used when a failed response carries no `message` field
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.codingpt.com";

/// Path of the token refresh endpoint
pub const DEFAULT_REFRESH_ENDPOINT: &str = "/api/users/refresh";

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every endpoint is joined to
    pub base_url: String,
    /// Request timeout (applies to each attempt and to the refresh call)
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Endpoint used to exchange the refresh token
    pub refresh_endpoint: String,
    /// Store a rotated refresh token when the refresh response carries one
    pub persist_rotated_refresh_token: bool,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("CodingPT/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            refresh_endpoint: DEFAULT_REFRESH_ENDPOINT.to_string(),
            persist_rotated_refresh_token: false,
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the refresh endpoint path
    pub fn with_refresh_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.refresh_endpoint = endpoint.into();
        self
    }

    /// Persist rotated refresh tokens returned by the refresh endpoint
    pub fn with_rotated_refresh_tokens(mut self, enabled: bool) -> Self {
        self.persist_rotated_refresh_token = enabled;
        self
    }

    /// Join `endpoint` to the base URL with exactly one `/` between them
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Raw attempt outcome
// =============================================================================

/// What a single network attempt produced, before normalization
#[derive(Debug)]
enum Attempt {
    /// A response was received and its body read
    Response { status: u16, body: String },
    /// The request could not be completed
    Transport(String),
}

impl Attempt {
    fn is_unauthorized(&self) -> bool {
        matches!(self, Attempt::Response { status: 401, .. })
    }
}

// =============================================================================
// API Client
// =============================================================================

/// Client for the CodingPT HTTP API
///
/// # Examples
/// ```
/// use api_client::{ApiClient, ApiClientConfig, ApiRequest};
/// use std::sync::Arc;
/// use storage::MemoryStore;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApiClient::new(
///         ApiClientConfig::new("https://api.codingpt.com"),
///         Arc::new(MemoryStore::new()),
///     )?;
///
///     let response = client
///         .request::<serde_json::Value>(&ApiRequest::get("/api/users/verify"))
///         .await;
///     if !response.is_success() {
///         println!("not logged in: {:?}", response.error());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client
    http: ReqwestClient,
    /// Configuration
    config: ApiClientConfig,
    /// Token storage
    auth: AuthStorage,
    /// Access-token renewal
    refresher: TokenRefresher,
}

impl ApiClient {
    /// Create a new API client over an injected store
    pub fn new(config: ApiClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            Error::InvalidInput(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let auth = AuthStorage::new(store);
        let refresher = TokenRefresher::new(
            http.clone(),
            config.url_for(&config.refresh_endpoint),
            auth.clone(),
        );

        Ok(Self {
            http,
            config,
            auth,
            refresher,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Token and user-record storage used by this client
    pub fn auth_storage(&self) -> &AuthStorage {
        &self.auth
    }

    /// Send a request, renewing the access token once on a 401
    ///
    /// Never fails and never panics: transport errors, server errors and
    /// malformed bodies all come back as a failed [`ApiResponse`].
    pub async fn request<T>(&self, request: &ApiRequest) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        let first = self.attempt(request).await;

        if first.is_unauthorized() && self.renew_access_token().await {
            tracing::debug!(
                endpoint = %request.endpoint,
                "Retrying request with renewed access token"
            );
            let retried = self.attempt(request).await;
            return Self::normalize(retried);
        }

        Self::normalize(first)
    }

    /// Send a request without the 401 renewal step
    pub async fn request_once<T>(&self, request: &ApiRequest) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        Self::normalize(self.attempt(request).await)
    }

    /// Refresh and persist a new access token; `true` when a retry is warranted
    async fn renew_access_token(&self) -> bool {
        let Some(RefreshedTokens {
            access_token,
            refresh_token,
        }) = self.refresher.refresh().await
        else {
            return false;
        };

        if let Err(e) = self.auth.set_access_token(&access_token).await {
            tracing::warn!("Failed to persist renewed access token: {}", e);
            return false;
        }

        if self.config.persist_rotated_refresh_token {
            if let Some(refresh_token) = refresh_token {
                if let Err(e) = self.auth.set_refresh_token(&refresh_token).await {
                    tracing::warn!("Failed to persist rotated refresh token: {}", e);
                }
            }
        }

        true
    }

    /// Execute one network attempt with freshly built headers
    async fn attempt(&self, request: &ApiRequest) -> Attempt {
        let url = self.config.url_for(&request.endpoint);

        let mut headers = build_headers(&self.auth).await;
        overlay_headers(&mut headers, &self.config.default_headers);
        overlay_headers(&mut headers, &request.headers);

        let mut req = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };

        for (key, value) in &headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.outgoing_body() {
            req = req.body(body.to_vec());
        }

        tracing::debug!(method = %request.method, url = %url, "Sending API request");

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, "API request failed: {}", e);
                return Attempt::Transport(format!("Request failed: {}", e));
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => Attempt::Response { status, body },
            Err(e) => {
                tracing::warn!(url = %url, status, "Failed to read response body: {}", e);
                Attempt::Transport(format!("Failed to read response: {}", e))
            }
        }
    }

    /// Fold an attempt into the normalized response shape
    fn normalize<T>(attempt: Attempt) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        let (status, body) = match attempt {
            Attempt::Response { status, body } => (status, body),
            Attempt::Transport(error) => return ApiResponse::failure(error),
        };

        let parsed: std::result::Result<Value, serde_json::Error> = if body.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(&body)
        };
        let message = parsed
            .as_ref()
            .ok()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);

        if !(200..300).contains(&status) {
            let error = message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            return ApiResponse::failure(error)
                .with_status(status)
                .with_message(message);
        }

        match parsed.and_then(serde_json::from_value::<T>) {
            Ok(data) => ApiResponse::ok(data).with_status(status).with_message(message),
            Err(e) => {
                tracing::warn!(status, "Failed to parse API response: {}", e);
                ApiResponse::failure(format!("Failed to parse JSON: {}", e))
                    .with_status(status)
                    .with_message(message)
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Client Tests
// =============================================================================
