//! # Sub-router
//!
//! Method + path matching with path-parameter extraction for one resource.
//! Each [`crate::resource::Resource`] owns an independent `SubRouter`; the
//! outer mount layer delegates to it with the path relative to the resource
//! root.
//!
//! ## Matching
//!
//! Patterns use `:name` segments (`/:id`, `/:id/relationships/author`) and
//! are compiled to regexes at registration time. The empty pattern denotes
//! the collection root and matches both `""` and `"/"`.
//!
//! Registering the same method + pattern twice is permitted; lookups scan in
//! reverse registration order, so the **last registration wins**.
//!
//! All registration happens before traffic is served ("register, then
//! serve"); the router is read-only at request time and needs no locking.

mod core;

pub use self::core::{ParamVec, RouteMatch, SubRouter, MAX_INLINE_PARAMS};
