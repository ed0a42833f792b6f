//! Store catalog endpoints

use crate::client::ApiClient;
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};

/// Purchasable course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: u64,
    /// Product name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Product kind
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Price
    #[serde(default)]
    pub price: f64,
    /// Introductory lecture text
    #[serde(default)]
    pub lecture_intro: Option<String>,
}

/// Store category with its products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCategory {
    /// Category id
    pub id: u64,
    /// Category name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Products in this category
    #[serde(rename = "Products", default)]
    pub products: Vec<Product>,
}

/// Store endpoint wrappers
#[derive(Debug, Clone, Copy)]
pub struct StoreApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StoreApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every store category with its products
    pub async fn catalog(&self) -> ApiResponse<Vec<StoreCategory>> {
        self.client.request(&ApiRequest::get("/api/stores")).await
    }
}
