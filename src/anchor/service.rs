//! Anchor domain service. Forwards every call to the repository unchanged.

use std::sync::Arc;

use crate::anchor::repository::{AnchorRepository, RepositoryError};
use crate::anchor::Anchor;

#[derive(Clone)]
pub struct AnchorService {
    repository: Arc<dyn AnchorRepository>,
}

impl AnchorService {
    pub fn new(repository: Arc<dyn AnchorRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_anchor(&self, anchor: Anchor) -> Result<i64, RepositoryError> {
        self.repository.add(anchor).await
    }

    pub async fn update_anchor(&self, anchor: Anchor) -> Result<(), RepositoryError> {
        self.repository.update(anchor).await
    }

    pub async fn get_anchor(&self, id: i64) -> Result<Anchor, RepositoryError> {
        self.repository.get(id).await
    }

    pub async fn list_anchors(&self) -> Result<Vec<Anchor>, RepositoryError> {
        self.repository.list().await
    }

    pub async fn delete_anchor(&self, id: i64) -> Result<(), RepositoryError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::repository::InMemoryAnchorRepository;

    #[tokio::test]
    async fn test_delegates_to_repository() {
        let repository = Arc::new(InMemoryAnchorRepository::new());
        let service = AnchorService::new(repository.clone());

        let id = service.add_anchor(Anchor::new(0, "https://a.test")).await.unwrap();
        assert_eq!(repository.len(), 1);

        service.update_anchor(Anchor::new(id, "https://b.test")).await.unwrap();
        assert_eq!(service.get_anchor(id).await.unwrap().url, "https://b.test");
        assert_eq!(service.list_anchors().await.unwrap().len(), 1);

        service.delete_anchor(id).await.unwrap();
        assert!(repository.is_empty());
        assert!(service.get_anchor(id).await.is_err());
    }
}
