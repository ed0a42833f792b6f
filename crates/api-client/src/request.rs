//! Request descriptors
//!
//! An [`ApiRequest`] is built per call and discarded afterwards. The body is
//! stored as the exact bytes serialized from the caller's input, so field order
//! on the wire matches the input type's declaration order.

use serde::Serialize;
use std::collections::HashMap;

/// HTTP method for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// GET request
    #[default]
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a body may be sent with this method
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API request parameters
///
/// # Examples
/// ```
/// use api_client::request::{ApiRequest, HttpMethod};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Enroll {
///     user_id: u64,
///     product_id: u64,
/// }
///
/// let request = ApiRequest::post("/api/myclass")
///     .json_body(&Enroll { user_id: 1, product_id: 2 })
///     .unwrap();
///
/// assert_eq!(request.method, HttpMethod::Post);
/// assert_eq!(request.body.as_deref(), Some(&br#"{"user_id":1,"product_id":2}"#[..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the configured base URL (e.g. "/api/lessons")
    pub endpoint: String,
    /// Caller headers; these win over every default on collision
    pub headers: HashMap<String, String>,
    /// JSON body bytes (ignored for GET)
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a request with an explicit method
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Create a POST request
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Create a PUT request
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// Create a DELETE request
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the raw request body
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request body from JSON
    pub fn json_body<T>(mut self, value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(value)?;
        self.body = Some(body);
        Ok(self)
    }

    /// Body bytes that will actually be sent
    pub fn outgoing_body(&self) -> Option<&[u8]> {
        if self.method.allows_body() {
            self.body.as_deref()
        } else {
            None
        }
    }
}
