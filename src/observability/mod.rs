//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (subscriber: env filter + fmt output)
//!
//! Per request:
//!     → http::middleware::logging (one access line, with request id)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not formatted strings
//! - Request ID flows from the request-id layer into every access line
//! - Client errors log at debug; only server faults log at error

pub mod logging;
