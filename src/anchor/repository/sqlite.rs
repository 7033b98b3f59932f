//! SQLite anchor storage over a `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{AnchorRepository, RepositoryError};
use crate::anchor::Anchor;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS anchors (id INTEGER PRIMARY KEY AUTOINCREMENT, url TEXT NOT NULL)";

#[derive(Debug, Clone)]
pub struct SqliteAnchorRepository {
    pool: SqlitePool,
}

impl SqliteAnchorRepository {
    /// Open (creating if missing) the database at `dsn` and make sure the
    /// `anchors` table exists.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        if dsn.trim().is_empty() {
            return Err(RepositoryError::Unavailable("dsn required".to_string()));
        }

        let options = SqliteConnectOptions::from_str(dsn)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repository = Self::from_pool(pool);
        repository.ensure_table().await?;
        Ok(repository)
    }

    /// Wrap an existing pool. The `anchors` table must already exist.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ensure_table(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl AnchorRepository for SqliteAnchorRepository {
    async fn add(&self, anchor: Anchor) -> Result<i64, RepositoryError> {
        let result = sqlx::query("INSERT INTO anchors (url) VALUES (?)")
            .bind(&anchor.url)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, anchor: Anchor) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE anchors SET url = ? WHERE id = ?")
            .bind(&anchor.url)
            .bind(anchor.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Anchor, RepositoryError> {
        let (id, url) = sqlx::query_as::<_, (i64, String)>("SELECT id, url FROM anchors WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(Anchor { id, url })
    }

    async fn list(&self) -> Result<Vec<Anchor>, RepositoryError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, url FROM anchors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, url)| Anchor { id, url }).collect())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM anchors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
