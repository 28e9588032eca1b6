//! Typed errors carried through the dispatch pipeline.
//!
//! Two failure sources exist: request-body parse failures and storage
//! capability failures. Both are represented as [`ApiError`] values carrying
//! an HTTP status, and both are forwarded verbatim to the shared response
//! sender. The core never inspects, retries, or classifies errors beyond
//! "is there one" - the first failure in a pipeline short-circuits it.
//!
//! Because capability results are plain `Result` values, the boxed-typed-nil
//! false positive that interface-typed errors can produce in other runtimes
//! cannot occur here; an `Ok` is a success, full stop.

use serde_json::{json, Value};
use thiserror::Error;

/// A JSON:API-shaped error: HTTP status plus human-readable title and detail.
///
/// Storage backends construct these directly (or via the convenience
/// constructors) and the dispatch layer turns them into error documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title} ({status}): {detail}")]
pub struct ApiError {
    /// HTTP status code the response sender will use
    pub status: u16,
    /// Short, stable summary of the problem class
    pub title: String,
    /// Occurrence-specific explanation
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", detail)
    }

    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found", detail)
    }

    #[must_use]
    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict", detail)
    }

    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(500, "Internal Server Error", detail)
    }

    /// Render as a JSON:API error document: `{"errors": [ ... ]}`.
    ///
    /// The `status` member is a string per the JSON:API wire convention.
    #[must_use]
    pub fn to_document(&self) -> Value {
        json!({
            "errors": [{
                "status": self.status.to_string(),
                "title": self.title,
                "detail": self.detail,
            }]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_document_shape() {
        let doc = ApiError::not_found("no widget 42").to_document();
        assert_eq!(doc["errors"][0]["status"], "404");
        assert_eq!(doc["errors"][0]["title"], "Not Found");
        assert_eq!(doc["errors"][0]["detail"], "no widget 42");
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::conflict("already exists");
        assert_eq!(err.to_string(), "Conflict (409): already exists");
    }
}
