//! Shared fixtures for the integration test suite: an in-memory storage
//! backend with per-operation call counters and switchable failures.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use restmount::{ApiError, CrudStorage, RequestContext, ResourceObject, SingleStorage};

/// In-memory store keyed by id. Counters record how many times each
/// capability ran so tests can assert short-circuit behavior.
pub struct MockStore {
    kind: String,
    objects: Mutex<BTreeMap<String, ResourceObject>>,
    failure: Mutex<Option<ApiError>>,
    pub save_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockStore {
    pub fn new(kind: &str) -> Arc<Self> {
        Arc::new(Self {
            kind: kind.to_string(),
            objects: Mutex::new(BTreeMap::new()),
            failure: Mutex::new(None),
            save_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        })
    }

    /// Seed an object directly, bypassing save and its counter.
    pub fn insert(&self, object: ResourceObject) {
        self.objects
            .lock()
            .unwrap()
            .insert(object.id.clone(), object);
    }

    /// Make every subsequent capability call fail with `err`.
    pub fn fail_with(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl CrudStorage for MockStore {
    fn save(
        &self,
        _ctx: &RequestContext,
        mut object: ResourceObject,
    ) -> Result<ResourceObject, ApiError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        if object.id.is_empty() {
            object.id = format!("{}", self.objects.lock().unwrap().len() + 1);
        }
        self.insert(object.clone());
        Ok(object)
    }

    fn get(&self, _ctx: &RequestContext, id: &str) -> Result<ResourceObject, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.objects
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("no {} with id {id}", self.kind)))
    }

    fn list(&self, _ctx: &RequestContext) -> Result<Vec<ResourceObject>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.objects.lock().unwrap().values().cloned().collect())
    }

    fn update(
        &self,
        _ctx: &RequestContext,
        object: ResourceObject,
    ) -> Result<ResourceObject, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut objects = self.objects.lock().unwrap();
        if !objects.contains_key(&object.id) {
            return Err(ApiError::not_found(format!(
                "no {} with id {}",
                self.kind, object.id
            )));
        }
        objects.insert(object.id.clone(), object.clone());
        Ok(object)
    }

    fn delete(&self, _ctx: &RequestContext, id: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.objects
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found(format!("no {} with id {id}", self.kind)))
    }
}

/// Singleton-shaped view of the same store: the single object lives under
/// the empty-string key.
impl SingleStorage for MockStore {
    fn save(
        &self,
        _ctx: &RequestContext,
        mut object: ResourceObject,
    ) -> Result<ResourceObject, ApiError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        object.id = String::new();
        self.insert(object.clone());
        Ok(object)
    }

    fn get(&self, _ctx: &RequestContext) -> Result<ResourceObject, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.objects
            .lock()
            .unwrap()
            .get("")
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("no {} configured", self.kind)))
    }

    fn update(
        &self,
        _ctx: &RequestContext,
        mut object: ResourceObject,
    ) -> Result<ResourceObject, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        object.id = String::new();
        self.insert(object.clone());
        Ok(object)
    }

    fn delete(&self, _ctx: &RequestContext) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.objects
            .lock()
            .unwrap()
            .remove("")
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found(format!("no {} configured", self.kind)))
    }
}

/// A widget object with a couple of attributes, for seeding stores.
pub fn widget(id: &str) -> ResourceObject {
    ResourceObject::new("widgets", id).with_attributes(json!({ "name": format!("widget-{id}") }))
}

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows dispatch
/// events; a no-op when one is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
