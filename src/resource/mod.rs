//! # Resource
//!
//! The addressable unit: one REST/JSON:API type, its sub-router, its
//! relationship index, and its diagnostic route registry.
//!
//! A resource is constructed once per type at startup, mutated only during
//! the registration phase, and treated as immutable for the rest of the
//! process. Registration must finish before the host starts serving traffic
//! ("register, then serve"); the core holds no locks around registration.
//!
//! ## Registration sugar
//!
//! [`Resource::crud`] registers the full collection surface, [`Resource::single_crud`]
//! the singleton variant. Individual methods (`post`, `get`, `list`, `patch`,
//! `delete`, and their `single_*` counterparts) allow partial-CRUD resources.
//! [`Resource::to_one`] / [`Resource::to_many`] add read-only relationship
//! routes, and [`Resource::action`] adds custom fetch-shaped routes under an
//! arbitrary name.

mod core;

pub use self::core::{Relationship, Resource, RouteRecord};
