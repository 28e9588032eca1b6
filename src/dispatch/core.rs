use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;
use tracing::debug;

use crate::context::RequestContext;
use crate::document::{parse_object, Document, ResourceObject};
use crate::error::ApiError;
use crate::router::ParamVec;

/// Maximum inline response headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 8;

/// Stack-allocated header storage. Names are shared `Arc<str>` since the
/// same few header names repeat across every response.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Handler closure bound to a route at registration time.
///
/// One invocation per inbound request; concurrency is supplied by the host
/// server, and the closure captures only immutable registration-time state.
pub type HandlerFn = dyn Fn(&RequestContext, HandlerRequest) -> HandlerResponse + Send + Sync;

/// Request data handed to a bound handler.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Path parameters extracted by the sub-router
    pub path_params: ParamVec,
    /// Raw request body; decoded inside the create/update shapes so parse
    /// failures short-circuit before storage is invoked
    pub body: Option<String>,
}

impl HandlerRequest {
    /// Get a path parameter by name. Last write wins on duplicate names.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// The `:id` segment, or the empty string on singleton routes that
    /// carry no id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        self.get_path_param("id").unwrap_or("")
    }
}

/// Response produced by a handler: status, headers, optional JSON body.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderVec,
    /// JSON body; `None` for no-content responses
    pub body: Option<Value>,
}

impl HandlerResponse {
    /// A JSON response with the content-type header set.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body: Some(body),
        }
    }

    /// A 204 response: empty body, no content-type.
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            status: 204,
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Get a response header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Successful payload shapes the shared sender knows how to encode.
pub(crate) enum Reply {
    /// Freshly created object, sent with 201
    Created(ResourceObject),
    /// Single object, sent with 200
    Object(ResourceObject),
    /// Collection, sent with 200
    Collection(Vec<ResourceObject>),
}

/// The single shared send operation.
///
/// Inspects the outcome and serializes either a primary-data document or a
/// JSON:API error document; all status-code selection happens here.
pub(crate) fn send(outcome: Result<Reply, ApiError>) -> HandlerResponse {
    match outcome {
        Ok(Reply::Created(object)) => encode(201, Document::of_one(object)),
        Ok(Reply::Object(object)) => encode(200, Document::of_one(object)),
        Ok(Reply::Collection(objects)) => encode(200, Document::of_many(objects)),
        Err(err) => {
            debug!(status = err.status, detail = %err.detail, "sending error document");
            HandlerResponse::json(err.status, err.to_document())
        }
    }
}

fn encode(status: u16, document: Document) -> HandlerResponse {
    match serde_json::to_value(document) {
        Ok(body) => HandlerResponse::json(status, body),
        Err(e) => {
            let err = ApiError::internal(format!("failed to encode response document: {e}"));
            HandlerResponse::json(err.status, err.to_document())
        }
    }
}

/// `POST` shape: parse body, save, send the created object.
pub(crate) fn create<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext, ResourceObject) -> Result<ResourceObject, ApiError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(move |ctx, req| {
        let object = match parse_object(req.body.as_deref()) {
            Ok(object) => object,
            Err(err) => return send(Err(err)),
        };
        send(storage(ctx, object).map(Reply::Created))
    })
}

/// `GET .../:id` shape, also bound for to-one relationships and actions.
pub(crate) fn fetch<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext, &str) -> Result<ResourceObject, ApiError> + Send + Sync + 'static,
{
    Arc::new(move |ctx, req| send(storage(ctx, req.id()).map(Reply::Object)))
}

/// `GET` collection-root shape.
pub(crate) fn list<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext) -> Result<Vec<ResourceObject>, ApiError> + Send + Sync + 'static,
{
    Arc::new(move |ctx, _req| send(storage(ctx).map(Reply::Collection)))
}

/// `PATCH` shape: parse body, update, send the updated object.
pub(crate) fn update<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext, ResourceObject) -> Result<ResourceObject, ApiError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(move |ctx, req| {
        let object = match parse_object(req.body.as_deref()) {
            Ok(object) => object,
            Err(err) => return send(Err(err)),
        };
        send(storage(ctx, object).map(Reply::Object))
    })
}

/// `DELETE` shape: the one handler that bypasses the sender on success and
/// responds 204 with no body.
pub(crate) fn remove<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext, &str) -> Result<(), ApiError> + Send + Sync + 'static,
{
    Arc::new(move |ctx, req| match storage(ctx, req.id()) {
        Ok(()) => HandlerResponse::no_content(),
        Err(err) => send(Err(err)),
    })
}

/// To-many relationship shape: fetch the related collection for a parent id.
pub(crate) fn to_many<F>(storage: F) -> Arc<HandlerFn>
where
    F: Fn(&RequestContext, &str) -> Result<Vec<ResourceObject>, ApiError> + Send + Sync + 'static,
{
    Arc::new(move |ctx, req| send(storage(ctx, req.id()).map(Reply::Collection)))
}
