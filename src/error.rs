//! Error Types
//!
//! Failures of the HTTP and browser layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request never completed (offline, CORS, aborted)
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A DOM API rejected (FileReader, image decoding, FormData)
    #[error("Browser error: {0}")]
    Browser(String),
}

impl ApiError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub(crate) fn from_js(value: wasm_bindgen::JsValue) -> Self {
        ApiError::Browser(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<reqwasm::Error> for ApiError {
    fn from(e: reqwasm::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let e = ApiError::Status { status: 401, body: String::new() };
        assert_eq!(e.status(), Some(401));
        assert!(e.is_unauthorized());

        let e = ApiError::Network("offline".into());
        assert_eq!(e.status(), None);
        assert!(!e.is_unauthorized());
    }

    #[test]
    fn test_display() {
        let e = ApiError::Status { status: 500, body: "boom".into() };
        assert_eq!(e.to_string(), "HTTP 500: boom");
    }
}
