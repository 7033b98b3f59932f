//! Anchor HTTP handler.
//!
//! # Responsibilities
//! - Register the anchor routes into the route table
//! - Check `Content-Type` and strictly decode JSON bodies
//! - Parse numeric ids from path parameters
//! - Map service results to status codes and JSON bodies
//!
//! # Routes (under the API prefix)
//! ```text
//! POST    /anchor          → 201 {"id": n}
//! GET     /anchors         → 200 [{"id","url"}, ...]
//! GET     /anchor/{id}     → 200 {"id","url"}
//! PUT     /anchor          → 204
//! DELETE  /anchor/{id}     → 204
//! OPTIONS on each path     → 204
//! ```

use std::future::Future;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::anchor::{Anchor, AnchorService, Created};
use crate::http::request::{decode_json, require_content_type, JSON_CONTENT_TYPE, MAX_BODY_BYTES};
use crate::http::response::ApiError;
use crate::routing::{PathParams, RouteError, RouteTable};

const ANCHOR_ID: &str = "/anchor/([^/]+)";

#[derive(Clone)]
pub struct AnchorHandler {
    service: AnchorService,
    max_body_bytes: usize,
}

impl AnchorHandler {
    pub fn new(service: AnchorService) -> Self {
        Self {
            service,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    /// Override the request body cap.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Register every anchor route. Same-path routes are registered per method.
    pub fn register_routes(&self, table: &mut RouteTable) -> Result<(), RouteError> {
        table
            .register(
                [Method::POST],
                "/anchor",
                self.bind(|h, req, _| async move { h.add_anchor(req).await.into_response() }),
            )?
            .register(
                [Method::GET],
                "/anchors",
                self.bind(|h, _, _| async move { h.list_anchors().await.into_response() }),
            )?
            .register(
                [Method::GET],
                ANCHOR_ID,
                self.bind(|h, _, params| async move { h.get_anchor(&params).await.into_response() }),
            )?
            .register(
                [Method::PUT],
                "/anchor",
                self.bind(|h, req, _| async move { h.update_anchor(req).await.into_response() }),
            )?
            .register(
                [Method::DELETE],
                ANCHOR_ID,
                self.bind(|h, _, params| async move {
                    h.delete_anchor(&params).await.into_response()
                }),
            )?
            .register([Method::OPTIONS], "/anchor", preflight)?
            .register([Method::OPTIONS], "/anchors", preflight)?
            .register([Method::OPTIONS], ANCHOR_ID, preflight)?;
        Ok(())
    }

    fn bind<F, Fut>(
        &self,
        op: F,
    ) -> impl Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static
    where
        F: Fn(AnchorHandler, Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler = self.clone();
        move |req, params| op(handler.clone(), req, params)
    }

    pub async fn add_anchor(&self, req: Request<Body>) -> Result<Response, ApiError> {
        require_content_type(req.headers(), JSON_CONTENT_TYPE)?;
        let anchor: Anchor = decode_json(req.into_body(), self.max_body_bytes).await?;

        let id = self.service.add_anchor(anchor).await?;
        tracing::debug!(id, "Anchor created");
        Ok((StatusCode::CREATED, Json(Created { id })).into_response())
    }

    pub async fn list_anchors(&self) -> Result<Json<Vec<Anchor>>, ApiError> {
        Ok(Json(self.service.list_anchors().await?))
    }

    pub async fn get_anchor(&self, params: &PathParams) -> Result<Json<Anchor>, ApiError> {
        let id = parse_id(params.get(0))?;
        Ok(Json(self.service.get_anchor(id).await?))
    }

    pub async fn update_anchor(&self, req: Request<Body>) -> Result<StatusCode, ApiError> {
        require_content_type(req.headers(), JSON_CONTENT_TYPE)?;
        let anchor: Anchor = decode_json(req.into_body(), self.max_body_bytes).await?;

        self.service.update_anchor(anchor).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn delete_anchor(&self, params: &PathParams) -> Result<StatusCode, ApiError> {
        let id = parse_id(params.get(0))?;
        self.service.delete_anchor(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

async fn preflight(_req: Request<Body>, _params: PathParams) -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid anchor id '{}'", raw)))
}
