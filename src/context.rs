//! Request-scoped context handed to every storage capability.
//!
//! The core never enforces timeouts, retries, or backpressure itself; a
//! capability that performs blocking work is expected to check the deadline
//! and give up once it has passed.

use std::time::{Duration, Instant};

use crate::ids::RequestId;

/// Per-request state passed through the dispatch pipeline into storage.
///
/// One value is constructed per inbound request. Nothing in it is shared
/// across requests, so handlers running concurrently never contend on it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// Optional deadline after which storage work should be abandoned
    pub deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a context with a fresh request id and no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            deadline: None,
        }
    }

    /// Create a context whose deadline is `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            request_id: RequestId::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Whether the deadline has passed. Always `false` when no deadline is set.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_deadline_never_expires() {
        assert!(!RequestContext::new().expired());
    }

    #[test]
    fn elapsed_deadline_expires() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(0));
        assert!(ctx.expired());
    }
}
