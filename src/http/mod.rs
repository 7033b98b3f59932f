//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (cors → request id → logging)
//!     → routing::Router (regex match, 404/405)
//!     → resource handler
//!         → request.rs (content type, bounded JSON decode)
//!         → response.rs (JSON bodies, error envelope)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use response::{ApiError, ErrorResponse};
pub use server::HttpServer;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";
