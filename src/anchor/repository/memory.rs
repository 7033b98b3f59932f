//! Process-local anchor storage.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::{AnchorRepository, RepositoryError};
use crate::anchor::Anchor;

/// A thread-safe map of id -> url.
///
/// Ids start at 1 and are never reused, like SQLite rowids.
#[derive(Debug)]
pub struct InMemoryAnchorRepository {
    anchors: DashMap<i64, String>,
    next_id: AtomicI64,
}

impl InMemoryAnchorRepository {
    pub fn new() -> Self {
        Self {
            anchors: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl Default for InMemoryAnchorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnchorRepository for InMemoryAnchorRepository {
    async fn add(&self, anchor: Anchor) -> Result<i64, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.anchors.insert(id, anchor.url);
        Ok(id)
    }

    async fn update(&self, anchor: Anchor) -> Result<(), RepositoryError> {
        // Same as `UPDATE ... WHERE id=?`: no row, no change, no error.
        if let Some(mut url) = self.anchors.get_mut(&anchor.id) {
            *url = anchor.url;
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Anchor, RepositoryError> {
        self.anchors
            .get(&id)
            .map(|url| Anchor::new(id, url.value().clone()))
            .ok_or(RepositoryError::Missing(id))
    }

    async fn list(&self) -> Result<Vec<Anchor>, RepositoryError> {
        let mut anchors: Vec<Anchor> = self
            .anchors
            .iter()
            .map(|entry| Anchor::new(*entry.key(), entry.value().clone()))
            .collect();
        anchors.sort_by_key(|a| a.id);
        Ok(anchors)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.anchors.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_cycle() {
        let repo = InMemoryAnchorRepository::new();

        let a = repo.add(Anchor::new(99, "https://a.test")).await.unwrap();
        let b = repo.add(Anchor::new(0, "https://b.test")).await.unwrap();
        assert_eq!((a, b), (1, 2));

        repo.update(Anchor::new(a, "https://a2.test")).await.unwrap();
        assert_eq!(repo.get(a).await.unwrap().url, "https://a2.test");

        repo.delete(a).await.unwrap();
        assert!(matches!(repo.get(a).await, Err(RepositoryError::Missing(1))));
        assert_eq!(repo.list().await.unwrap(), vec![Anchor::new(2, "https://b.test")]);
    }

    #[tokio::test]
    async fn test_missing_rows_on_write_are_not_errors() {
        let repo = InMemoryAnchorRepository::new();
        repo.update(Anchor::new(7, "https://x.test")).await.unwrap();
        repo.delete(7).await.unwrap();
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_ids_not_reused_and_list_sorted() {
        let repo = InMemoryAnchorRepository::new();
        for i in 0..5 {
            repo.add(Anchor::new(0, format!("https://{}.test", i))).await.unwrap();
        }
        repo.delete(5).await.unwrap();
        assert_eq!(repo.add(Anchor::new(0, "https://new.test")).await.unwrap(), 6);

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 6]);
    }
}
