//! Permissive CORS headers.
//! Every response carries `Access-Control-Allow-Origin: *` and
//! `Access-Control-Allow-Headers: *` as defaults laid down before the inner
//! handler runs; a handler that sets either header keeps its own value.
//! Preflight is not special-cased.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

pub async fn cors_middleware(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .or_insert(HeaderValue::from_static("*"));
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static("*"));

    response
}
