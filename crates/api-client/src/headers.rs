//! Header construction
//!
//! Headers are rebuilt from the store on every attempt; the request layer
//! never caches the access token.

use std::collections::HashMap;
use storage::AuthStorage;

/// `Content-Type` header name
pub const CONTENT_TYPE: &str = "Content-Type";

/// `Accept` header name
pub const ACCEPT: &str = "Accept";

/// `Authorization` header name
pub const AUTHORIZATION: &str = "Authorization";

const JSON: &str = "application/json";

/// JSON content negotiation headers, without credentials
pub fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        (CONTENT_TYPE.to_string(), JSON.to_string()),
        (ACCEPT.to_string(), JSON.to_string()),
    ])
}

/// Default headers plus `Authorization: Bearer <token>` when a token is stored
///
/// Never fails: a store read error is logged and treated as "no token".
pub async fn build_headers(auth: &AuthStorage) -> HashMap<String, String> {
    let mut headers = default_headers();

    match auth.access_token().await {
        Ok(Some(token)) => {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Failed to read access token, sending request without it: {}", e);
        }
    }

    headers
}

/// Insert `overrides` into `base`, replacing keys that match ignoring ASCII case
pub fn overlay_headers(base: &mut HashMap<String, String>, overrides: &HashMap<String, String>) {
    for (key, value) in overrides {
        base.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
        base.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use std::sync::Arc;
    use storage::{KeyValueStore, MemoryStore};

    #[test]
    fn test_default_headers() {
        let headers = default_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(CONTENT_TYPE), Some(&"application/json".to_string()));
        assert_eq!(headers.get(ACCEPT), Some(&"application/json".to_string()));
    }

    #[tokio::test]
    async fn test_build_headers_without_token() {
        let auth = AuthStorage::new(Arc::new(MemoryStore::new()));

        let headers = build_headers(&auth).await;

        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_build_headers_with_token() {
        let auth = fixtures::auth_storage_with(Some("abc"), None);

        let headers = build_headers(&auth).await;

        assert_eq!(headers.get(AUTHORIZATION), Some(&"Bearer abc".to_string()));
        assert_eq!(headers.len(), 3);
    }

    #[tokio::test]
    async fn test_build_headers_reads_store_each_time() {
        let kv = MemoryStore::new();
        let auth = AuthStorage::new(Arc::new(kv.clone()));

        kv.set("accessToken", "first").await.unwrap();
        assert_eq!(
            build_headers(&auth).await.get(AUTHORIZATION),
            Some(&"Bearer first".to_string())
        );

        kv.set("accessToken", "second").await.unwrap();
        assert_eq!(
            build_headers(&auth).await.get(AUTHORIZATION),
            Some(&"Bearer second".to_string())
        );
    }

    #[test]
    fn test_overlay_is_case_insensitive() {
        let mut headers = default_headers();
        let overrides = HashMap::from([("content-type".to_string(), "text/plain".to_string())]);

        overlay_headers(&mut headers, &overrides);

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type"), Some(&"text/plain".to_string()));
        assert!(!headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_overlay_adds_new_headers() {
        let mut headers = default_headers();
        let overrides = HashMap::from([("X-Request-Id".to_string(), "42".to_string())]);

        overlay_headers(&mut headers, &overrides);

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("X-Request-Id"), Some(&"42".to_string()));
    }
}
