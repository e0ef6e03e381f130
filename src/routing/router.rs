//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the fixed route table
//! - Look up the matching route for a request
//! - Return the matched route or an explicit `NotFound`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Explicit NotFound rather than silent default

use axum::body::Body;
use axum::http::{Method, Request};

use super::matcher::{AndMatcher, ExactTargetMatcher, Matcher, MethodMatcher};

/// Liveness check path.
pub const HEALTH_PATH: &str = "/health";

/// The proxied chat-completions path.
pub const CHAT_COMPLETIONS_PATH: &str = "/api/v1/chat/completions";

/// What a request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Health,
    ChatCompletions,
    NotFound,
}

#[derive(Debug)]
struct Route {
    kind: RouteKind,
    matcher: AndMatcher,
}

/// The proxy's route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Build the route table: `GET /health` and `POST /api/v1/chat/completions`.
    pub fn new() -> Self {
        let routes = vec![
            Route {
                kind: RouteKind::Health,
                matcher: exact(Method::GET, HEALTH_PATH),
            },
            Route {
                kind: RouteKind::ChatCompletions,
                matcher: exact(Method::POST, CHAT_COMPLETIONS_PATH),
            },
        ];
        Self { routes }
    }

    /// Find the route for a request.
    pub fn match_request(&self, req: &Request<Body>) -> RouteKind {
        self.routes
            .iter()
            .find(|r| r.matcher.matches(req))
            .map(|r| r.kind)
            .unwrap_or(RouteKind::NotFound)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn exact(method: Method, target: &str) -> AndMatcher {
    AndMatcher::new(vec![
        Box::new(MethodMatcher::new(method)),
        Box::new(ExactTargetMatcher::new(target)),
    ])
}
