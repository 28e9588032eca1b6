use std::sync::Arc;

use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::dispatch::HandlerFn;

/// Maximum number of path parameters before heap allocation.
/// Resource routes carry at most two (`:id` plus a relationship segment).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the request path.
///
/// Param names come from the static route table and are shared as `Arc<str>`;
/// values are per-request data extracted from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// One registered route: compiled pattern plus the bound handler.
struct RouteEntry {
    method: Method,
    pattern: String,
    regex: Regex,
    param_names: Vec<Arc<str>>,
    handler: Arc<HandlerFn>,
}

/// Result of matching a request path against the route table.
pub struct RouteMatch {
    /// Handler closure bound at registration time
    pub handler: Arc<HandlerFn>,
    /// Path parameters extracted from the URL (e.g. `:id` -> `"42"`)
    pub params: ParamVec,
}

/// Ordered route table owned by a single resource.
#[derive(Default)]
pub struct SubRouter {
    routes: Vec<RouteEntry>,
}

impl SubRouter {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for `method` + `pattern`.
    ///
    /// Duplicates are appended, not deduplicated; [`SubRouter::route`] scans
    /// in reverse so the most recent registration shadows earlier ones.
    pub fn handle(&mut self, method: Method, pattern: &str, handler: Arc<HandlerFn>) {
        let (regex, param_names) = Self::pattern_to_regex(pattern);
        debug!(method = %method, pattern = %pattern, "route registered");
        self.routes.push(RouteEntry {
            method,
            pattern: pattern.to_string(),
            regex,
            param_names,
            handler,
        });
    }

    /// Match a request to a registered route, extracting path parameters.
    ///
    /// `path` is relative to the resource root; the collection root may be
    /// given as `""` or `"/"`.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        for entry in self.routes.iter().rev() {
            if entry.method != *method {
                continue;
            }
            let Some(captures) = entry.regex.captures(path) else {
                continue;
            };

            let mut params = ParamVec::new();
            for (i, name) in entry.param_names.iter().enumerate() {
                if let Some(value) = captures.get(i + 1) {
                    params.push((Arc::clone(name), value.as_str().to_string()));
                }
            }

            debug!(
                method = %method,
                path = %path,
                pattern = %entry.pattern,
                params = ?params,
                "route matched"
            );
            return Some(RouteMatch {
                handler: Arc::clone(&entry.handler),
                params,
            });
        }

        warn!(method = %method, path = %path, "no route matched");
        None
    }

    /// Number of registered routes (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compile a `:name`-segment pattern into a regex and its parameter names.
    ///
    /// The empty pattern compiles to `^/?$` so the collection root matches
    /// with or without a trailing slash. Patterns are static registration
    /// input, so a compile failure is a programming error and panics.
    fn pattern_to_regex(pattern: &str) -> (Regex, Vec<Arc<str>>) {
        if pattern.is_empty() || pattern == "/" {
            #[allow(clippy::expect_used)]
            return (
                Regex::new(r"^/?$").expect("failed to compile root pattern"),
                Vec::new(),
            );
        }

        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::new();

        for segment in pattern.split('/') {
            if let Some(name) = segment.strip_prefix(':') {
                source.push_str("/([^/]+)");
                param_names.push(Arc::from(name));
            } else if !segment.is_empty() {
                source.push('/');
                source.push_str(&regex::escape(segment));
            }
        }

        source.push('$');
        #[allow(clippy::expect_used)]
        let regex = Regex::new(&source).expect("failed to compile path pattern");

        (regex, param_names)
    }
}
