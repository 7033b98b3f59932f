//! Middleware wrapped around the router.
//!
//! # Data Flow
//! ```text
//! request → cors → request id (set + propagate) → logging → router
//! ```
//!
//! # Design Decisions
//! - CORS is outermost so 404/405 responses carry its headers too
//! - Logging sits inside request-id handling so every line has an id
//! - No middleware short-circuits; each always runs the inner service

pub mod cors;
pub mod logging;

pub use cors::cors_middleware;
pub use logging::logging_middleware;
