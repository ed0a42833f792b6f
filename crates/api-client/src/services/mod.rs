//! Typed endpoint wrappers
//!
//! Each wrapper binds one endpoint path and method to its request and response
//! types and delegates to [`ApiClient::request`]. None of them add control
//! flow of their own.

pub mod auth;
pub mod lessons;
pub mod my_classes;
pub mod store;
pub mod user;

pub use auth::{AuthApi, LoginResponse, SessionStatus, SessionUser};
pub use lessons::{Lesson, LessonProgress, LessonsApi, Slide};
pub use my_classes::{Enrollment, MyClassesApi};
pub use store::{Product, StoreApi, StoreCategory};
pub use user::{ProfileUpdate, UserApi, UserRecord, UserStats};

use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

impl ApiClient {
    /// Login, session check and logout endpoints
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Lesson endpoints
    pub fn lessons(&self) -> LessonsApi<'_> {
        LessonsApi::new(self)
    }

    /// Store catalog endpoints
    pub fn store(&self) -> StoreApi<'_> {
        StoreApi::new(self)
    }

    /// Enrolled-course endpoints
    pub fn my_classes(&self) -> MyClassesApi<'_> {
        MyClassesApi::new(self)
    }

    /// Profile endpoints
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }
}

/// Attach a JSON body and send, folding an encoding error into a failure
async fn send_json<B, T>(client: &ApiClient, request: ApiRequest, body: &B) -> ApiResponse<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    match request.json_body(body) {
        Ok(request) => client.request(&request).await,
        Err(e) => ApiResponse::failure(format!("Failed to encode request body: {}", e)),
    }
}

/// Accept an identifier sent either as a JSON string or a JSON number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Numeric user id that may arrive as a numeric string
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(id)) => Some(id),
        Some(Raw::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}
