//! # Dispatch Adapter
//!
//! Wraps each storage capability in a handler closure implementing the
//! uniform pipeline: parameter extraction, optional request-body decoding,
//! capability invocation, response encoding. Eight handler shapes exist
//! (create, fetch-by-id, list, delete, update, to-one relationship, to-many
//! relationship, custom action); relationship-to-one and action reuse the
//! fetch shape.
//!
//! Every shape funnels its outcome through one shared `send` operation that
//! inspects success/error and performs all serialization and status-code
//! selection. Handlers never set status codes themselves, with one exception:
//! a successful delete responds 204 with an empty body and no JSON at all.
//!
//! Failures propagate fail-fast: the first error in a pipeline (parse first,
//! then invoke) short-circuits the remaining steps and is forwarded verbatim.

mod core;

pub use self::core::{HandlerFn, HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};
pub(crate) use self::core::{create, fetch, list, remove, to_many, update};
