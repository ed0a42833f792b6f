//! CodingPT API Client Library
//!
//! This crate provides the authenticated request layer for the CodingPT
//! backend: header construction from the stored access token, transparent
//! access-token renewal on a 401, a normalized response type, and typed
//! wrappers for the lesson, store, "my class" and user endpoints.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod headers;
pub mod refresh;
pub mod request;
pub mod response;
pub mod services;

#[cfg(test)]
mod test_utils;

pub use client::{ApiClient, ApiClientConfig};
pub use request::{ApiRequest, HttpMethod};
pub use response::ApiResponse;

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for API client operations
///
/// [`ApiClient::request`] never returns these; it folds every failure into an
/// [`ApiResponse`]. They surface from construction and from
/// [`ApiResponse::into_result`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// API error with status code and message
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code (0 when no response was received)
        status: u16,
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = Error::InvalidInput("test".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            status: 404,
            message: "Lesson not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): Lesson not found");
    }
}
