//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured anchor storage
//! - Compile the route table
//! - Bind the listener last, so traffic only arrives when ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::anchor::{repository, AnchorRepository, RepositoryError};
use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::routing::RouteError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("storage unavailable: {0}")]
    Storage(#[from] RepositoryError),

    #[error("route table invalid: {0}")]
    Routes(#[from] RouteError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A server ready to run on its bound listener.
pub struct Ready {
    pub server: HttpServer,
    pub listener: TcpListener,
}

/// Open storage from the config, then build and bind the server.
pub async fn start(config: ServiceConfig) -> Result<Ready, StartupError> {
    let repository = repository::open(&config.storage).await?;
    start_with(config, repository).await
}

/// Build and bind the server over an already-open repository.
pub async fn start_with(
    config: ServiceConfig,
    repository: Arc<dyn AnchorRepository>,
) -> Result<Ready, StartupError> {
    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, repository)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    Ok(Ready { server, listener })
}
