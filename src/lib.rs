//! junkboy: anchor (URL bookmark) service over a regex-routed REST API.

pub mod anchor;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use anchor::{Anchor, AnchorHandler, AnchorRepository, AnchorService};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{PathParams, RouteTable, Router};
