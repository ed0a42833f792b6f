//! Authentication endpoints

use super::{lenient_id, send_json, UserRecord};
use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Identity-provider ID token
    pub id_token: String,
}

/// Login response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// User record, when the server includes it
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// User summary in a session check response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    /// User id
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Display name
    #[serde(default, alias = "nickname")]
    pub name: Option<String>,
}

/// Session check response
///
/// The user id may arrive at the top level (`id` or `userId`) or inside a
/// nested `user` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionStatus {
    /// Top-level user id
    #[serde(default, alias = "userId", deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Nested user summary
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl SessionStatus {
    /// User id from whichever location the server used
    pub fn user_id(&self) -> Option<i64> {
        self.id.or_else(|| self.user.as_ref().and_then(|u| u.id))
    }
}

/// Authentication endpoint wrappers
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange an ID token for a credential pair
    ///
    /// Persisting the returned tokens is the caller's job.
    pub async fn login(&self, id_token: &str) -> ApiResponse<LoginResponse> {
        let body = LoginRequest {
            id_token: id_token.to_string(),
        };
        send_json(self.client, ApiRequest::post("/api/users/login"), &body).await
    }

    /// Validate the stored access token
    pub async fn check_session(&self) -> ApiResponse<SessionStatus> {
        self.client.request(&ApiRequest::get("/api/users/verify")).await
    }

    /// Invalidate the session on the server
    pub async fn logout(&self) -> ApiResponse<Value> {
        self.client.request(&ApiRequest::post("/api/users/logout")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bodies;
    use serde_json::json;

    #[test]
    fn test_login_request_wire_name() {
        let body = serde_json::to_string(&LoginRequest {
            id_token: "google-token".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"idToken":"google-token"}"#);
    }

    #[test]
    fn test_login_response_parse() {
        let response: LoginResponse = serde_json::from_value(bodies::login()).unwrap();

        assert_eq!(response.access_token, "access-1");
        assert_eq!(response.refresh_token, "refresh-1");
        assert_eq!(response.user.unwrap().nickname.as_deref(), Some("coder"));
    }

    #[test]
    fn test_login_response_without_user() {
        let response: LoginResponse =
            serde_json::from_value(json!({"accessToken": "a", "refreshToken": "r"})).unwrap();
        assert!(response.user.is_none());
    }

    #[test]
    fn test_session_status_id_locations() {
        let top: SessionStatus = serde_json::from_value(json!({"id": 7})).unwrap();
        assert_eq!(top.user_id(), Some(7));

        let alias: SessionStatus = serde_json::from_value(json!({"userId": "8"})).unwrap();
        assert_eq!(alias.user_id(), Some(8));

        let nested: SessionStatus = serde_json::from_value(json!({
            "success": true,
            "user": {"id": "9", "email": "a@b.c", "name": "A"}
        }))
        .unwrap();
        assert_eq!(nested.user_id(), Some(9));

        let empty: SessionStatus = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.user_id(), None);
    }
}
