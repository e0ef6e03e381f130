//! Route matching logic.
//!
//! # Responsibilities
//! - Match request method (exact)
//! - Match request target, path plus query string (exact, case-sensitive)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - The query string is part of the match: `/health?x=1` is not `/health`
//! - Only origin-form targets match; `GET http://host/health` does not
//! - No prefix or regex matching; the proxy exposes fixed endpoints only

use axum::body::Body;
use axum::http::{Method, Request};

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.method() == self.method
    }
}

/// Matches the request target exactly, query string included.
#[derive(Debug, Clone)]
pub struct ExactTargetMatcher {
    target: String,
}

impl ExactTargetMatcher {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Matcher for ExactTargetMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        let uri = req.uri();
        if uri.scheme().is_some() || uri.authority().is_some() {
            return false;
        }
        uri.path_and_query()
            .map(|pq| pq.as_str() == self.target)
            .unwrap_or(false)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
