//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the route table from the resource handlers
//! - Wrap the regex router in the middleware stack
//! - Bind server to listener
//! - Serve until Ctrl+C or the shutdown broadcast fires

use std::sync::Arc;

use axum::{body::Body, http::Request, middleware};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::anchor::{AnchorHandler, AnchorRepository, AnchorService};
use crate::config::{ApiConfig, ServiceConfig};
use crate::http::middleware::{cors_middleware, logging_middleware};
use crate::lifecycle::signals::wait_for_ctrl_c;
use crate::routing::{RouteError, RouteTable, Router};

/// HTTP server for the anchor API.
pub struct HttpServer {
    app: axum::Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and storage.
    ///
    /// Fails if a route pattern does not compile.
    pub fn new(
        config: ServiceConfig,
        repository: Arc<dyn AnchorRepository>,
    ) -> Result<Self, RouteError> {
        let router = build_router(&config.api, AnchorService::new(repository))?;

        tracing::info!(
            prefix = %config.api.path_prefix,
            routes = router.routes().len(),
            "Routes compiled"
        );

        let app = Self::build_app(Arc::new(router));
        Ok(Self { app, config })
    }

    /// Wrap the router in the middleware stack. Layers added last run first.
    pub fn build_app(router: Arc<Router>) -> axum::Router {
        axum::Router::new()
            .fallback(move |req: Request<Body>| {
                let router = router.clone();
                async move { router.dispatch(req).await }
            })
            .layer(middleware::from_fn(logging_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(middleware::from_fn(cors_middleware))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The assembled application, for driving in-process.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }
}

/// Register every resource handler's routes and freeze the table.
pub fn build_router(api: &ApiConfig, service: AnchorService) -> Result<Router, RouteError> {
    let mut table = RouteTable::new(api.path_prefix.clone());

    AnchorHandler::new(service)
        .with_max_body_bytes(api.max_body_bytes)
        .register_routes(&mut table)?;

    Ok(Router::new(table))
}

async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = wait_for_ctrl_c() => {}
        _ = shutdown.recv() => {
            tracing::info!("Shutdown requested");
        }
    }
}
