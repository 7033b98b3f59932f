//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     resource handlers → table.rs (register methods + pattern + handler)
//!     → matcher.rs (compile "^(?:prefix+pattern)$")
//!     → router.rs (freeze as immutable Router)
//!
//! Per request:
//!     (method, path) → router.rs (scan in registration order)
//!     → Found: params.rs (captured groups) → handler
//!     → MethodNotAllowed: 405 + Allow
//!     → NotFound: 404
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - A bad pattern is a startup error, never a per-request one
//! - First match wins (ordered by registration)

pub mod matcher;
pub mod params;
pub mod router;
pub mod table;

pub use params::PathParams;
pub use router::{RouteMatch, Router};
pub use table::{RouteError, RouteTable};
