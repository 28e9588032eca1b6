//! Storage capability set supplied by the caller.
//!
//! Each CRUD operation is a narrow, function-shaped capability so that any
//! backend can be plugged in without ceremony: the individual registration
//! methods on [`crate::resource::Resource`] accept bare closures, while
//! [`CrudStorage`] and [`SingleStorage`] bundle the full capability sets for
//! the sugar constructors.
//!
//! Capabilities receive the request-scoped [`RequestContext`] and are
//! responsible for honoring its deadline; the routing core only forwards it.
//!
//! Capability shapes (each returns `Result<_, ApiError>`):
//!
//! ```text
//! save / update : Fn(&RequestContext, ResourceObject) -> ResourceObject
//! get           : Fn(&RequestContext, &str)           -> ResourceObject
//! list          : Fn(&RequestContext)                 -> Vec<ResourceObject>
//! delete        : Fn(&RequestContext, &str)           -> ()
//! to-many fetch : Fn(&RequestContext, &str)           -> Vec<ResourceObject>
//! ```

use crate::context::RequestContext;
use crate::document::ResourceObject;
use crate::error::ApiError;

/// Full capability set for a collection resource.
///
/// One method per operation; implementors supply the persistence, the routing
/// core supplies the URL surface and the request/response pipeline.
pub trait CrudStorage: Send + Sync {
    /// Persist a new object and return the stored form (id assigned).
    fn save(
        &self,
        ctx: &RequestContext,
        object: ResourceObject,
    ) -> Result<ResourceObject, ApiError>;

    /// Fetch one object by id.
    fn get(&self, ctx: &RequestContext, id: &str) -> Result<ResourceObject, ApiError>;

    /// List the full collection.
    fn list(&self, ctx: &RequestContext) -> Result<Vec<ResourceObject>, ApiError>;

    /// Apply a partial update and return the updated object.
    fn update(
        &self,
        ctx: &RequestContext,
        object: ResourceObject,
    ) -> Result<ResourceObject, ApiError>;

    /// Delete one object by id.
    fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), ApiError>;
}

/// Capability set for a singleton resource: one instance under its type
/// path, so there is no list operation and no id to address.
pub trait SingleStorage: Send + Sync {
    fn save(
        &self,
        ctx: &RequestContext,
        object: ResourceObject,
    ) -> Result<ResourceObject, ApiError>;

    fn get(&self, ctx: &RequestContext) -> Result<ResourceObject, ApiError>;

    fn update(
        &self,
        ctx: &RequestContext,
        object: ResourceObject,
    ) -> Result<ResourceObject, ApiError>;

    fn delete(&self, ctx: &RequestContext) -> Result<(), ApiError>;
}
