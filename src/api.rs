//! Mount layer: a set of resources served under one URL prefix.
//!
//! The outer HTTP server hands the full request path to [`Api::handle`],
//! which strips the prefix, resolves the first path segment to a mounted
//! [`Resource`], and delegates the remainder to that resource's sub-router.

use std::collections::BTreeMap;

use http::Method;
use tracing::debug;

use crate::context::RequestContext;
use crate::dispatch::HandlerResponse;
use crate::error::ApiError;
use crate::resource::Resource;

/// A collection of resources mounted under a shared prefix.
///
/// Like its resources, an `Api` is assembled at startup and immutable while
/// serving; mounting happens strictly before traffic.
pub struct Api {
    prefix: String,
    resources: BTreeMap<String, Resource>,
}

impl Api {
    /// Create an API rooted at `prefix`.
    ///
    /// The prefix is normalized to a leading-slash, no-trailing-slash form;
    /// `""`, `"/"`, `"api"`, and `"/api/"` are all accepted spellings.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self {
            prefix,
            resources: BTreeMap::new(),
        }
    }

    /// Normalized prefix, `""` when the API is mounted at the root.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Mount a resource under `/<prefix>/<type>`.
    ///
    /// Mounting a second resource with the same type replaces the first.
    pub fn add(&mut self, resource: Resource) {
        debug!(resource = %resource.kind(), prefix = %self.prefix, "resource mounted");
        self.resources.insert(resource.kind().to_string(), resource);
    }

    /// Look up a mounted resource by type name.
    #[must_use]
    pub fn resource(&self, kind: &str) -> Option<&Resource> {
        self.resources.get(kind)
    }

    /// Dispatch a request by its full path (prefix included).
    ///
    /// A path outside the prefix or naming an unmounted type produces a 404
    /// JSON:API error document.
    #[must_use]
    pub fn handle(
        &self,
        ctx: &RequestContext,
        method: &Method,
        path: &str,
        body: Option<&str>,
    ) -> HandlerResponse {
        let Some(rest) = path.strip_prefix(self.prefix.as_str()) else {
            return not_found(method, path);
        };

        // The prefix must end on a segment boundary: "/apiwidgets" is not
        // under "/api".
        if !rest.is_empty() && !rest.starts_with('/') {
            return not_found(method, path);
        }

        let rest = rest.strip_prefix('/').unwrap_or(rest);
        let (kind, remainder) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        match self.resources.get(kind) {
            Some(resource) => resource.handle(ctx, method, remainder, body),
            None => not_found(method, path),
        }
    }

    /// Concatenated route trees of every mounted resource, in type order.
    #[must_use]
    pub fn route_tree(&self) -> String {
        let trees: Vec<String> = self
            .resources
            .values()
            .map(Resource::route_tree)
            .filter(|t| !t.is_empty())
            .collect();
        trees.join("\n")
    }
}

fn not_found(method: &Method, path: &str) -> HandlerResponse {
    let err = ApiError::not_found(format!("no resource mounted for {method} {path}"));
    HandlerResponse::json(err.status, err.to_document())
}
