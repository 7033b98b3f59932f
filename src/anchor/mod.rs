//! Anchor resource: bookmarked URLs.
//!
//! # Data Flow
//! ```text
//! router → handler.rs (HTTP ⇄ domain, body/id validation)
//!     → service.rs (pass-through)
//!     → repository/ (SQLite or in-memory)
//! ```

pub mod handler;
pub mod repository;
pub mod service;

use serde::{Deserialize, Serialize};

pub use handler::AnchorHandler;
pub use repository::{AnchorRepository, RepositoryError};
pub use service::AnchorService;

/// A bookmarked URL.
///
/// On input `id` may be omitted (it defaults to 0 and is ignored on create);
/// unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Anchor {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub url: String,
}

impl Anchor {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }
}

/// Body of a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}
