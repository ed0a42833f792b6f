//! Normalized response type
//!
//! Every outcome of the request layer (success, server error, transport
//! failure, malformed body) is folded into an [`ApiResponse`]. A successful
//! response always carries data and a failed one always carries an error
//! string; the private representation makes any other combination
//! unrepresentable.

use serde::Serialize;

/// Uniform success/data/error result of an API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    outcome: Result<T, String>,
    message: Option<String>,
    status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            outcome: Ok(data),
            message: None,
            status: None,
        }
    }

    /// Failed response with a human-readable error
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            outcome: Err(error.into()),
            message: None,
            status: None,
        }
    }

    /// Attach the HTTP status the response was derived from
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the server's top-level `message` field
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Response data (present exactly when successful)
    pub fn data(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// Consume the response, returning its data
    pub fn into_data(self) -> Option<T> {
        self.outcome.ok()
    }

    /// Error description (present exactly when failed)
    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }

    /// Server-supplied `message`, if the body carried one
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Convert the data, keeping status and message
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            outcome: self.outcome.map(f),
            message: self.message,
            status: self.status,
        }
    }

    /// Convert into a `Result`, turning a failure into [`crate::Error::Api`]
    pub fn into_result(self) -> crate::Result<T> {
        let status = self.status.unwrap_or(0);
        self.outcome.map_err(|message| crate::Error::Api { status, message })
    }
}

/// Wire-compatible view: `{ success, data?, error?, message? }`
impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ApiResponse", 4)?;
        state.serialize_field("success", &self.is_success())?;
        match &self.outcome {
            Ok(data) => state.serialize_field("data", data)?,
            Err(_) => state.skip_field("data")?,
        }
        match &self.outcome {
            Ok(_) => state.skip_field("error")?,
            Err(error) => state.serialize_field("error", error)?,
        }
        match &self.message {
            Some(message) => state.serialize_field("message", message)?,
            None => state.skip_field("message")?,
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response() {
        let response = ApiResponse::ok(json!({"id": 7})).with_status(200);

        assert!(response.is_success());
        assert_eq!(response.data(), Some(&json!({"id": 7})));
        assert!(response.error().is_none());
        assert_eq!(response.status(), Some(200));
    }

    #[test]
    fn test_failure_response() {
        let response: ApiResponse<()> = ApiResponse::failure("Unauthorized")
            .with_status(401)
            .with_message(Some("Unauthorized".to_string()));

        assert!(!response.is_success());
        assert!(response.data().is_none());
        assert_eq!(response.error(), Some("Unauthorized"));
        assert_eq!(response.message(), Some("Unauthorized"));
    }

    #[test]
    fn test_into_result() {
        let ok: ApiResponse<u8> = ApiResponse::ok(3);
        assert_eq!(ok.into_result().unwrap(), 3);

        let failed: ApiResponse<u8> = ApiResponse::failure("nope").with_status(500);
        match failed.into_result() {
            Err(crate::Error::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = ApiResponse::ok(vec![1, 2, 3])
            .with_status(200)
            .with_message(Some("fine".to_string()))
            .map(|v| v.len());

        assert_eq!(response.data(), Some(&3));
        assert_eq!(response.status(), Some(200));
        assert_eq!(response.message(), Some("fine"));
    }

    #[test]
    fn test_serialized_shape() {
        let ok = serde_json::to_value(ApiResponse::ok(json!({"ok": true}))).unwrap();
        assert_eq!(ok, json!({"success": true, "data": {"ok": true}}));

        let failed: ApiResponse<()> = ApiResponse::failure("API request failed");
        let failed = serde_json::to_value(failed).unwrap();
        assert_eq!(failed, json!({"success": false, "error": "API request failed"}));
    }
}
