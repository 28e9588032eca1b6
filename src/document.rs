//! Minimal JSON:API document types.
//!
//! Only the slice of the wire convention the routing core needs: a resource
//! object with `type`/`id`/`attributes`, a top-level document whose `data`
//! member is one object or a list of them, and a parser that extracts the
//! primary resource object from a request body. Full document validation
//! (included resources, links, sparse fieldsets) is out of scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// A single JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Resource type name (the JSON:API `type` member)
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource identifier; empty for client-generated create requests
    #[serde(default)]
    pub id: String,
    /// Attribute bag, opaque to the routing core
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub attributes: Value,
}

impl ResourceObject {
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes: Value::Null,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Value) -> Self {
        self.attributes = attributes;
        self
    }
}

/// The `data` member of a top-level document: one object or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(ResourceObject),
    Many(Vec<ResourceObject>),
}

/// A top-level JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: PrimaryData,
}

impl Document {
    #[must_use]
    pub fn of_one(object: ResourceObject) -> Self {
        Self {
            data: PrimaryData::One(object),
        }
    }

    #[must_use]
    pub fn of_many(objects: Vec<ResourceObject>) -> Self {
        Self {
            data: PrimaryData::Many(objects),
        }
    }
}

/// Parse a request body into its primary resource object.
///
/// Fails with a 400 [`ApiError`] when the body is absent, is not a JSON:API
/// document, carries a collection where a single object is required, or
/// carries an object with an empty `type`. Create/update pipelines call this
/// before their storage capability, so a parse failure means storage is never
/// invoked.
pub fn parse_object(body: Option<&str>) -> Result<ResourceObject, ApiError> {
    let raw = body
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("request body is required"))?;

    let document: Document = serde_json::from_str(raw)
        .map_err(|e| ApiError::bad_request(format!("malformed JSON:API document: {e}")))?;

    match document.data {
        PrimaryData::Many(_) => Err(ApiError::bad_request(
            "expected a single primary resource object, got a collection",
        )),
        PrimaryData::One(object) if object.kind.is_empty() => {
            Err(ApiError::bad_request("resource object is missing a type"))
        }
        PrimaryData::One(object) => Ok(object),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_object() {
        let body = r#"{"data": {"type": "widgets", "id": "42", "attributes": {"name": "sprocket"}}}"#;
        let object = parse_object(Some(body)).unwrap();
        assert_eq!(object.kind, "widgets");
        assert_eq!(object.id, "42");
        assert_eq!(object.attributes["name"], "sprocket");
    }

    #[test]
    fn id_defaults_to_empty_for_create() {
        let body = r#"{"data": {"type": "widgets", "attributes": {}}}"#;
        let object = parse_object(Some(body)).unwrap();
        assert_eq!(object.id, "");
    }

    #[test]
    fn rejects_missing_body() {
        let err = parse_object(None).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn rejects_blank_body() {
        let err = parse_object(Some("   ")).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_object(Some("{not json")).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.contains("malformed"));
    }

    #[test]
    fn rejects_collection_data() {
        let body = r#"{"data": [{"type": "widgets", "id": "1"}]}"#;
        let err = parse_object(Some(body)).unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.contains("single primary resource"));
    }

    #[test]
    fn rejects_empty_type() {
        let body = r#"{"data": {"type": "", "id": "1"}}"#;
        let err = parse_object(Some(body)).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn single_object_document_serializes_flat() {
        let doc = Document::of_one(ResourceObject::new("widgets", "7"));
        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(value, json!({"data": {"type": "widgets", "id": "7"}}));
    }

    #[test]
    fn collection_document_serializes_as_array() {
        let doc = Document::of_many(vec![ResourceObject::new("tags", "1")]);
        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(value, json!({"data": [{"type": "tags", "id": "1"}]}));
    }
}
