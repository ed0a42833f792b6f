//! Enrolled-course ("my class") endpoints

use super::{send_json, Product};
use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Enrollment body; field order is part of the wire format
#[derive(Debug, Clone, Serialize)]
struct EnrollRequest {
    user_id: i64,
    product_id: u64,
}

/// Whether a user is enrolled in a product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enrollment {
    /// Enrollment flag
    #[serde(default, alias = "isEnrolled", alias = "enrolled")]
    pub is_enrolled: bool,
}

/// "My class" endpoint wrappers
#[derive(Debug, Clone, Copy)]
pub struct MyClassesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MyClassesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Products the user is enrolled in
    pub async fn list(&self, user_id: i64) -> ApiResponse<Vec<Product>> {
        self.client
            .request(&ApiRequest::get(format!("/api/myclass/{}", user_id)))
            .await
    }

    /// Enrollment status for one product
    pub async fn is_enrolled(&self, user_id: i64, product_id: u64) -> ApiResponse<Enrollment> {
        self.client
            .request(&ApiRequest::get(format!("/api/myclass/{}/{}", user_id, product_id)))
            .await
    }

    /// Enroll the user in a product
    pub async fn enroll(&self, user_id: i64, product_id: u64) -> ApiResponse<Value> {
        let body = EnrollRequest {
            user_id,
            product_id,
        };
        send_json(self.client, ApiRequest::post("/api/myclass"), &body).await
    }
}
