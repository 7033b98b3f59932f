//! Anchor persistence.
//!
//! # Responsibilities
//! - Define the five-operation repository contract
//! - Provide SQLite (`sqlite.rs`) and in-memory (`memory.rs`) backings
//! - Open the backing selected by configuration
//!
//! # Design Decisions
//! - Update and delete do not report missing rows; get does
//! - Listing is ordered by id in every backing

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::anchor::Anchor;
use crate::config::{StorageBackend, StorageConfig};

pub use memory::InMemoryAnchorRepository;
pub use sqlite::SqliteAnchorRepository;

/// Errors returned by anchor repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver or query failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// No anchor stored under this id.
    #[error("no anchor with id {0}")]
    Missing(i64),

    /// The store cannot serve requests.
    #[error("{0}")]
    Unavailable(String),
}

/// Storage contract for anchors.
#[async_trait]
pub trait AnchorRepository: Send + Sync {
    /// Store a new anchor and return its assigned id. `anchor.id` is ignored.
    async fn add(&self, anchor: Anchor) -> Result<i64, RepositoryError>;

    /// Replace the url of `anchor.id`.
    async fn update(&self, anchor: Anchor) -> Result<(), RepositoryError>;

    async fn get(&self, id: i64) -> Result<Anchor, RepositoryError>;

    async fn list(&self) -> Result<Vec<Anchor>, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Open the repository selected by `config`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn AnchorRepository>, RepositoryError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory anchor storage");
            Ok(Arc::new(InMemoryAnchorRepository::new()))
        }
        StorageBackend::Sqlite => {
            let repository =
                SqliteAnchorRepository::connect(&config.dsn, config.max_connections).await?;
            tracing::info!(dsn = %config.dsn, "Using SQLite anchor storage");
            Ok(Arc::new(repository))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let repository = open(&config).await.unwrap();
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_sqlite_requires_dsn() {
        let config = StorageConfig {
            backend: StorageBackend::Sqlite,
            dsn: String::new(),
            max_connections: 1,
        };
        let err = open(&config).await.err().unwrap();
        assert_eq!(err.to_string(), "dsn required");
    }
}
