use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;
use tracing::debug;

use crate::context::RequestContext;
use crate::dispatch::{self, HandlerFn, HandlerRequest, HandlerResponse};
use crate::document::ResourceObject;
use crate::error::ApiError;
use crate::router::SubRouter;
use crate::storage::{CrudStorage, SingleStorage};

/// Pattern for routes addressing one object by id.
const PAT_ID: &str = "/:id";
/// Pattern for routes addressing the collection root.
const PAT_ROOT: &str = "";

/// Kind of a registered relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Single related object, fetch-shaped handler
    ToOne,
    /// Related collection, list-shaped handler
    ToMany,
}

/// One registered (method, pattern) pair, kept for diagnostics only.
///
/// Never consulted for dispatch; the sub-router owns matching. Formatting is
/// lazy: [`Resource::route_tree`] renders records against the resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub method: Method,
    pub pattern: String,
}

impl fmt::Display for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.method, self.pattern)
    }
}

/// A REST/JSON:API resource: type name, sub-router, relationship index, and
/// append-only route registry.
///
/// Accessible under `/<type>` once mounted on an [`crate::api::Api`].
pub struct Resource {
    kind: String,
    sub_router: SubRouter,
    relationships: HashMap<String, Relationship>,
    routes: Vec<RouteRecord>,
}

impl Resource {
    /// An empty resource with no routes; register any subset manually.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            sub_router: SubRouter::new(),
            relationships: HashMap::new(),
            routes: Vec::new(),
        }
    }

    /// A resource with the full collection CRUD surface registered.
    #[must_use]
    pub fn new_crud(kind: impl Into<String>, storage: Arc<dyn CrudStorage>) -> Self {
        let mut resource = Self::new(kind);
        resource.crud(storage);
        resource
    }

    /// A singleton resource with the id-less CRUD surface registered.
    #[must_use]
    pub fn new_single(kind: impl Into<String>, storage: Arc<dyn SingleStorage>) -> Self {
        let mut resource = Self::new(kind);
        resource.single_crud(storage);
        resource
    }

    /// Resource type name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Registered relationships, keyed by normalized name.
    #[must_use]
    pub fn relationships(&self) -> &HashMap<String, Relationship> {
        &self.relationships
    }

    /// Registered route records in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Register the full collection surface:
    ///
    /// ```text
    /// GET    /<type>/:id
    /// PATCH  /<type>/:id
    /// POST   /<type>
    /// GET    /<type>
    /// DELETE /<type>/:id
    /// ```
    pub fn crud(&mut self, storage: Arc<dyn CrudStorage>) {
        let s = Arc::clone(&storage);
        self.get(move |ctx, id| s.get(ctx, id));
        let s = Arc::clone(&storage);
        self.patch(move |ctx, object| s.update(ctx, object));
        let s = Arc::clone(&storage);
        self.post(move |ctx, object| s.save(ctx, object));
        let s = Arc::clone(&storage);
        self.list(move |ctx| s.list(ctx));
        self.delete(move |ctx, id| storage.delete(ctx, id));
    }

    /// Register the singleton surface: the same shapes minus list, with no
    /// `:id` segment because a single resource is a singleton under its
    /// type path.
    ///
    /// ```text
    /// GET    /<type>
    /// PATCH  /<type>
    /// POST   /<type>
    /// DELETE /<type>
    /// ```
    pub fn single_crud(&mut self, storage: Arc<dyn SingleStorage>) {
        let s = Arc::clone(&storage);
        self.single_get(move |ctx, _id| s.get(ctx));
        let s = Arc::clone(&storage);
        self.single_patch(move |ctx, object| s.update(ctx, object));
        let s = Arc::clone(&storage);
        self.post(move |ctx, object| s.save(ctx, object));
        self.single_delete(move |ctx, _id| storage.delete(ctx));
    }

    /// Register a `POST /<type>` create handler.
    pub fn post<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, ResourceObject) -> Result<ResourceObject, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.register(Method::POST, PAT_ROOT, dispatch::create(storage));
    }

    /// Register a `GET /<type>/:id` fetch handler.
    pub fn get<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<ResourceObject, ApiError> + Send + Sync + 'static,
    {
        self.register(Method::GET, PAT_ID, dispatch::fetch(storage));
    }

    /// Register a `GET /<type>` list handler.
    pub fn list<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext) -> Result<Vec<ResourceObject>, ApiError> + Send + Sync + 'static,
    {
        self.register(Method::GET, PAT_ROOT, dispatch::list(storage));
    }

    /// Register a `PATCH /<type>/:id` update handler.
    pub fn patch<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, ResourceObject) -> Result<ResourceObject, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.register(Method::PATCH, PAT_ID, dispatch::update(storage));
    }

    /// Register a `DELETE /<type>/:id` delete handler.
    pub fn delete<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<(), ApiError> + Send + Sync + 'static,
    {
        self.register(Method::DELETE, PAT_ID, dispatch::remove(storage));
    }

    /// Register a `GET /<type>` fetch handler for a singleton resource.
    /// The capability receives the empty string as id.
    pub fn single_get<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<ResourceObject, ApiError> + Send + Sync + 'static,
    {
        self.register(Method::GET, PAT_ROOT, dispatch::fetch(storage));
    }

    /// Register a `PATCH /<type>` update handler for a singleton resource.
    pub fn single_patch<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, ResourceObject) -> Result<ResourceObject, ApiError>
            + Send
            + Sync
            + 'static,
    {
        self.register(Method::PATCH, PAT_ROOT, dispatch::update(storage));
    }

    /// Register a `DELETE /<type>` delete handler for a singleton resource.
    /// The capability receives the empty string as id.
    pub fn single_delete<F>(&mut self, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<(), ApiError> + Send + Sync + 'static,
    {
        self.register(Method::DELETE, PAT_ROOT, dispatch::remove(storage));
    }

    /// Register a one-to-one relationship.
    ///
    /// The name is normalized by stripping a trailing `s`, then a fetch-shaped
    /// handler is bound at both `GET /<type>/:id/<name>` and
    /// `GET /<type>/:id/relationships/<name>` (the JSON:API convention allows
    /// either form; both resolve to the same storage call).
    ///
    /// Relationship routes are read-only: writes to a related object go
    /// through that type's own top-level resource, never through here.
    /// Re-registering the same normalized name silently overwrites its kind.
    pub fn to_one<F>(&mut self, relationship_kind: &str, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<ResourceObject, ApiError> + Send + Sync + 'static,
    {
        let name = relationship_kind
            .strip_suffix('s')
            .unwrap_or(relationship_kind)
            .to_string();

        self.relationship(&name, dispatch::fetch(storage));
        self.relationships.insert(name, Relationship::ToOne);
    }

    /// Register a one-to-many relationship.
    ///
    /// The name is normalized by appending a trailing `s` if absent, then a
    /// list-shaped handler is bound at the same two path forms as
    /// [`Resource::to_one`]. Read-only, same as to-one.
    pub fn to_many<F>(&mut self, relationship_kind: &str, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<Vec<ResourceObject>, ApiError>
            + Send
            + Sync
            + 'static,
    {
        let name = if relationship_kind.ends_with('s') {
            relationship_kind.to_string()
        } else {
            format!("{relationship_kind}s")
        };

        self.relationship(&name, dispatch::to_many(storage));
        self.relationships.insert(name, Relationship::ToMany);
    }

    /// Register a custom read action at `GET /<type>/:id/<name>`.
    ///
    /// Semantically a fetch-by-id addressed by a verb-like name instead of a
    /// resource segment, e.g. `GET /widgets/42/search`; the capability
    /// receives the parent `:id` and the result flows through the same
    /// response pipeline as every other handler.
    pub fn action<F>(&mut self, action_name: &str, storage: F)
    where
        F: Fn(&RequestContext, &str) -> Result<ResourceObject, ApiError> + Send + Sync + 'static,
    {
        let pattern = format!("{PAT_ID}/{action_name}");
        self.register(Method::GET, &pattern, dispatch::fetch(storage));
    }

    /// Bind one relationship handler at both accepted path forms.
    fn relationship(&mut self, name: &str, handler: Arc<HandlerFn>) {
        let pattern = format!("{PAT_ID}/{name}");
        self.register(Method::GET, &pattern, Arc::clone(&handler));

        let pattern = format!("{PAT_ID}/relationships/{name}");
        self.register(Method::GET, &pattern, handler);
    }

    /// Register on the sub-router and append exactly one route record.
    fn register(&mut self, method: Method, pattern: &str, handler: Arc<HandlerFn>) {
        debug!(
            resource = %self.kind,
            method = %method,
            pattern = %pattern,
            "registering route"
        );
        self.sub_router.handle(method.clone(), pattern, handler);
        self.routes.push(RouteRecord {
            method,
            pattern: pattern.to_string(),
        });
    }

    /// Dispatch a request whose path is relative to this resource's root
    /// (`""` or `"/"` for the collection root, `"/42"` for an object).
    ///
    /// No match produces a 404 JSON:API error document.
    #[must_use]
    pub fn handle(
        &self,
        ctx: &RequestContext,
        method: &Method,
        path: &str,
        body: Option<&str>,
    ) -> HandlerResponse {
        match self.sub_router.route(method, path) {
            Some(matched) => {
                let request = HandlerRequest {
                    path_params: matched.params,
                    body: body.map(str::to_owned),
                };
                (matched.handler)(ctx, request)
            }
            None => {
                let err = ApiError::not_found(format!(
                    "no route for {method} /{}{path}",
                    self.kind
                ));
                HandlerResponse::json(err.status, err.to_document())
            }
        }
    }

    /// Newline-joined dump of every registered route in registration order,
    /// one `"<METHOD> - /<type><pattern>"` line per record. Diagnostics only.
    #[must_use]
    pub fn route_tree(&self) -> String {
        let lines: Vec<String> = self
            .routes
            .iter()
            .map(|record| format!("{} - /{}{}", record.method, self.kind, record.pattern))
            .collect();
        lines.join("\n")
    }
}
