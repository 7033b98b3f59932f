//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Own the compiled route table
//! - Resolve (method, path) to a route, a method mismatch, or no match
//! - Dispatch to the matched handler with its path parameters
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - O(n) scan in registration order; first path+method match wins
//! - A path match with the wrong method keeps scanning, so same-path
//!   routes with different methods can be registered separately
//! - `Allow` lists methods in first-seen order, duplicates kept
//! - Patterns match the percent-decoded path, so `%2F` counts as a segment
//!   separator

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::http::response::ApiError;
use crate::routing::params::PathParams;
use crate::routing::table::{Route, RouteTable};

/// Outcome of resolving a request against the route table.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    /// Path and method matched.
    Found { route: &'a Route, params: PathParams },
    /// At least one route matched the path, none accepted the method.
    MethodNotAllowed { allowed: Vec<Method> },
    /// No route matched the path.
    NotFound,
}

/// Regex router over an ordered route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Freeze a route table.
    pub fn new(table: RouteTable) -> Self {
        Self {
            routes: table.into_routes(),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request method and path.
    pub fn resolve<'a>(&'a self, method: &Method, path: &str) -> RouteMatch<'a> {
        let mut allowed: Vec<Method> = Vec::new();

        for route in &self.routes {
            let Some(params) = route.pattern().captures(path) else {
                continue;
            };

            if route.accepts(method) {
                return RouteMatch::Found { route, params };
            }

            allowed.extend(route.methods().iter().cloned());
        }

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed { allowed }
        }
    }

    /// Dispatch a request to its handler, or answer 404 / 405.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        let method = req.method().clone();
        let path = match percent_decode_str(req.uri().path()).decode_utf8() {
            Ok(path) => path.into_owned(),
            Err(_) => {
                return ApiError::bad_request("request path is not valid UTF-8").into_response();
            }
        };

        match self.resolve(&method, &path) {
            RouteMatch::Found { route, params } => route.call(req, params).await,
            RouteMatch::MethodNotAllowed { allowed } => {
                tracing::debug!(method = %method, path = %path, allowed = ?allowed, "Method not allowed");
                ApiError::MethodNotAllowed { allowed }.into_response()
            }
            RouteMatch::NotFound => {
                tracing::debug!(method = %method, path = %path, "No route matched");
                ApiError::NotFound.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    fn text(body: &'static str) -> impl Fn(Request<Body>, PathParams) -> std::future::Ready<Response> + Send + Sync {
        move |_req, _params| std::future::ready(body.into_response())
    }

    fn echo_params(_req: Request<Body>, params: PathParams) -> std::future::Ready<Response> {
        std::future::ready(params.as_slice().join(",").into_response())
    }

    fn anchor_router() -> Router {
        let mut table = RouteTable::new("/v1");
        table
            .register([Method::POST], "/anchor", text("add"))
            .unwrap()
            .register([Method::GET], "/anchors", text("list"))
            .unwrap()
            .register([Method::GET], "/anchor/([^/]+)", echo_params)
            .unwrap()
            .register([Method::PUT], "/anchor", text("update"))
            .unwrap()
            .register([Method::DELETE], "/anchor/([^/]+)", text("delete"))
            .unwrap();
        Router::new(table)
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_resolve_found_without_params() {
        let router = anchor_router();
        match router.resolve(&Method::POST, "/v1/anchor") {
            RouteMatch::Found { route, params } => {
                assert_eq!(route.methods(), [Method::POST]);
                assert!(params.is_empty());
            }
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_found_with_params() {
        let router = anchor_router();
        match router.resolve(&Method::GET, "/v1/anchor/42") {
            RouteMatch::Found { params, .. } => assert_eq!(params.as_slice(), ["42".to_string()]),
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_later_same_path_route_satisfies_method() {
        let router = anchor_router();
        match router.resolve(&Method::PUT, "/v1/anchor") {
            RouteMatch::Found { route, .. } => assert_eq!(route.methods(), [Method::PUT]),
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_method_not_allowed_accumulates() {
        let router = anchor_router();
        match router.resolve(&Method::PATCH, "/v1/anchor") {
            RouteMatch::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::POST, Method::PUT]);
            }
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_not_found() {
        let router = anchor_router();
        assert!(matches!(router.resolve(&Method::GET, "/v1/nothing"), RouteMatch::NotFound));
        assert!(matches!(router.resolve(&Method::GET, "/anchors"), RouteMatch::NotFound));
        assert!(matches!(router.resolve(&Method::GET, "/v1/anchor/1/2"), RouteMatch::NotFound));
    }

    #[test]
    fn test_allow_keeps_duplicates() {
        let mut table = RouteTable::new("");
        table
            .register([Method::GET, Method::OPTIONS], "/item/([0-9]+)", text("a"))
            .unwrap()
            .register([Method::OPTIONS, Method::DELETE], "/item/(.+)", text("b"))
            .unwrap();
        let router = Router::new(table);

        match router.resolve(&Method::POST, "/item/7") {
            RouteMatch::MethodNotAllowed { allowed } => assert_eq!(
                allowed,
                vec![Method::GET, Method::OPTIONS, Method::OPTIONS, Method::DELETE]
            ),
            other => panic!("unexpected match: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_full_match_wins() {
        let mut table = RouteTable::new("");
        table
            .register([Method::GET], "/item/([0-9]+)", text("numeric"))
            .unwrap()
            .register([Method::GET], "/item/(.+)", text("any"))
            .unwrap();
        let router = Router::new(table);

        let response = router.dispatch(request(Method::GET, "/item/7")).await;
        assert_eq!(body_string(response).await, "numeric");

        let response = router.dispatch(request(Method::GET, "/item/x")).await;
        assert_eq!(body_string(response).await, "any");
    }

    #[tokio::test]
    async fn test_dispatch_passes_params() {
        let router = anchor_router();
        let response = router.dispatch(request(Method::GET, "/v1/anchor/42")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "42");
    }

    #[tokio::test]
    async fn test_dispatch_405_sets_allow() {
        let router = anchor_router();
        let response = router.dispatch(request(Method::PATCH, "/v1/anchor/1")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, DELETE");
        assert_eq!(
            body_string(response).await,
            r#"{"status":405,"message":"method not allowed"}"#
        );
    }

    #[tokio::test]
    async fn test_dispatch_404() {
        let router = anchor_router();
        let response = router.dispatch(request(Method::GET, "/v1/missing")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::ALLOW).is_none());
        assert_eq!(
            body_string(response).await,
            r#"{"status":404,"message":"page not found"}"#
        );
    }

    #[tokio::test]
    async fn test_dispatch_matches_decoded_path() {
        let router = anchor_router();

        let response = router.dispatch(request(Method::GET, "/v1/anchor/%31")).await;
        assert_eq!(body_string(response).await, "1");

        let response = router.dispatch(request(Method::GET, "/v1/anchor%73")).await;
        assert_eq!(body_string(response).await, "list");

        let response = router.dispatch(request(Method::GET, "/v1/anchor/1%2F2")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_undecodable_path() {
        let router = anchor_router();
        let response = router.dispatch(request(Method::GET, "/v1/anchor/%FF")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            r#"{"status":400,"message":"request path is not valid UTF-8"}"#
        );
    }

    #[tokio::test]
    async fn test_path_matched_without_query() {
        let router = anchor_router();
        let response = router
            .dispatch(request(Method::GET, "/v1/anchors?limit=5"))
            .await;
        assert_eq!(body_string(response).await, "list");
    }
}
