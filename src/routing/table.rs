//! Route registration.
//!
//! # Responsibilities
//! - Collect (methods, pattern, handler) bindings in registration order
//! - Compile patterns eagerly so a bad pattern fails at startup
//!
//! # Design Decisions
//! - Registration order is match priority; overlaps are not checked
//! - The table is a plain builder: handlers register into it, then it is
//!   moved into the `Router` and never changes again

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::routing::matcher::PathPattern;
use crate::routing::params::PathParams;

/// Type-erased route handler.
pub type BoxedHandler =
    Arc<dyn Fn(Request<Body>, PathParams) -> BoxFuture<'static, Response> + Send + Sync>;

/// Errors raised while building the route table.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The pattern is not a valid regular expression.
    #[error("invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A route must accept at least one method.
    #[error("route '{0}' has no methods")]
    NoMethods(String),
}

/// A single (methods, pattern, handler) binding.
pub struct Route {
    methods: Vec<Method>,
    pattern: PathPattern,
    handler: BoxedHandler,
}

impl Route {
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Invoke the handler.
    pub fn call(&self, req: Request<Body>, params: PathParams) -> BoxFuture<'static, Response> {
        (self.handler)(req, params)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Ordered route table under a fixed path prefix.
#[derive(Debug)]
pub struct RouteTable {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table. Every registered pattern is prefixed with
    /// `prefix` (trailing slash stripped).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: Vec::new(),
        }
    }

    /// Append a route. Patterns registered earlier win over later ones.
    pub fn register<I, H, Fut>(
        &mut self,
        methods: I,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator<Item = Method>,
        H: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let mut accepted: Vec<Method> = Vec::new();
        for method in methods {
            if !accepted.contains(&method) {
                accepted.push(method);
            }
        }

        let pattern = PathPattern::compile(&self.prefix, pattern).map_err(|source| {
            RouteError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            }
        })?;

        if accepted.is_empty() {
            return Err(RouteError::NoMethods(pattern.as_str().to_owned()));
        }

        tracing::debug!(
            methods = ?accepted,
            pattern = %pattern.as_str(),
            "Route registered"
        );

        let handler: BoxedHandler = Arc::new(
            move |req: Request<Body>, params: PathParams| -> BoxFuture<'static, Response> {
                Box::pin(handler(req, params))
            },
        );
        self.routes.push(Route {
            methods: accepted,
            pattern,
            handler,
        });
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}
