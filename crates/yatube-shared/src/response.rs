//! Response bodies: rendered pages and RFC 7807 errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page: the template it is rendered with and the template context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub template: String,
    pub context: Map<String, Value>,
}

impl TemplateResponse {
    /// Deserialize one context entry.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.context
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
