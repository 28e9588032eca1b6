//! # restmount
//!
//! **restmount** turns a resource type name and a handful of storage
//! capabilities into a consistent set of JSON:API routes with uniform
//! request/response/error behavior.
//!
//! ## Overview
//!
//! The crate is purely a contract layer. It does not persist anything, does
//! not validate full JSON:API documents, and does not speak HTTP transport.
//! A caller supplies storage capabilities (save, get, list, update, delete,
//! relationship fetches); restmount supplies the URL surface, the dispatch
//! pipeline, and the error funnel.
//!
//! ## Architecture
//!
//! - **[`resource`]** - the addressable unit: registration sugar for CRUD,
//!   singleton, relationship, and action routes, plus the diagnostic route
//!   registry
//! - **[`router`]** - per-resource sub-router: method + path matching with
//!   path-parameter extraction
//! - **[`dispatch`]** - the adapter wrapping each capability in a uniform
//!   parse -> invoke -> encode pipeline
//! - **[`storage`]** - the capability traits callers implement
//! - **[`document`]** - minimal JSON:API wire types and body parsing
//! - **[`api`]** - mount layer serving many resources under one prefix
//! - **[`error`]**, **[`context`]**, **[`ids`]** - typed errors, the
//!   request-scoped context, and ULID request ids
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use http::Method;
//! use restmount::{Api, RequestContext, Resource, ResourceObject};
//!
//! // Register storage capabilities; any closure with the right shape works.
//! let mut widgets = Resource::new("widgets");
//! widgets.get(|_ctx, id| Ok(ResourceObject::new("widgets", id)));
//! widgets.list(|_ctx| Ok(vec![ResourceObject::new("widgets", "1")]));
//!
//! let mut api = Api::new("/api");
//! api.add(widgets);
//!
//! // Register, then serve: the api is immutable from here on.
//! let ctx = RequestContext::new();
//! let resp = api.handle(&ctx, &Method::GET, "/api/widgets/42", None);
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body.unwrap()["data"]["id"], "42");
//! ```
//!
//! ## Concurrency
//!
//! restmount supplies no concurrency of its own; the host server invokes
//! handlers, one logical invocation per request. Registration and dispatch
//! must not interleave: finish registering before accepting traffic. After
//! registration a [`Resource`] holds no mutable state, so concurrent
//! dispatch needs no locking.

pub mod api;
pub mod context;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod ids;
pub mod resource;
pub mod router;
pub mod storage;

pub use api::Api;
pub use context::RequestContext;
pub use dispatch::{HandlerRequest, HandlerResponse};
pub use document::{Document, PrimaryData, ResourceObject};
pub use error::ApiError;
pub use ids::RequestId;
pub use resource::{Relationship, Resource, RouteRecord};
pub use storage::{CrudStorage, SingleStorage};
