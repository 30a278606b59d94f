//! In-memory repository implementation.
//!
//! Used for development and tests. It mirrors the observable behaviour of the
//! Postgres repository: identifiers start at 1, are never reused, and listing is
//! ordered by identifier.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{ExampleModelRepository, RepositoryError, RepositoryResult};
use crate::models::{ExampleModel, ExampleModelId, NewExampleModel};

/// In-memory store backed by an ordered map.
#[derive(Debug)]
pub struct LocalRepository {
    models: RwLock<BTreeMap<ExampleModelId, ExampleModel>>,
    next_id: AtomicI64,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            models: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    /// Drop every record. Identifiers keep increasing afterwards.
    pub fn clear(&self) {
        self.models.write().clear();
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExampleModelRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn create_model(&self, model: &NewExampleModel) -> RepositoryResult<ExampleModel> {
        let id = ExampleModelId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = ExampleModel::from_new(id, model);
        self.models.write().insert(id, stored.clone());
        log::debug!("local: created example model {}", id);
        Ok(stored)
    }

    async fn get_model(&self, id: ExampleModelId) -> RepositoryResult<ExampleModel> {
        self.models
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id).in_operation("get_model"))
    }

    async fn list_models(&self) -> RepositoryResult<Vec<ExampleModel>> {
        Ok(self.models.read().values().cloned().collect())
    }

    async fn update_model(
        &self,
        id: ExampleModelId,
        model: &NewExampleModel,
    ) -> RepositoryResult<ExampleModel> {
        let mut models = self.models.write();
        let existing = models
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(id).in_operation("update_model"))?;
        existing.name = model.name.clone();
        existing.description = model.description.clone();
        Ok(existing.clone())
    }

    async fn delete_model(&self, id: ExampleModelId) -> RepositoryResult<()> {
        match self.models.write().remove(&id) {
            Some(_) => {
                log::debug!("local: deleted example model {}", id);
                Ok(())
            }
            None => Err(RepositoryError::not_found(id).in_operation("delete_model")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_model(name: &str) -> NewExampleModel {
        NewExampleModel {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let repo = LocalRepository::new();
        let a = repo.create_model(&new_model("a")).await.unwrap();
        let b = repo.create_model(&new_model("b")).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = LocalRepository::new();
        let a = repo.create_model(&new_model("a")).await.unwrap();
        repo.delete_model(a.id).await.unwrap();
        let b = repo.create_model(&new_model("b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = LocalRepository::new();
        let created = repo.create_model(&new_model("a")).await.unwrap();
        let replacement = NewExampleModel {
            name: "b".to_string(),
            description: Some("desc".to_string()),
        };
        let updated = repo.update_model(created.id, &replacement).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "b");
        assert_eq!(updated.description.as_deref(), Some("desc"));
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let repo = LocalRepository::new();
        let id = ExampleModelId::new(7);
        assert!(repo.get_model(id).await.unwrap_err().is_not_found());
        assert!(repo
            .update_model(id, &new_model("x"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(repo.delete_model(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = LocalRepository::new();
        repo.create_model(&new_model("a")).await.unwrap();
        assert_eq!(repo.len(), 1);
        repo.clear();
        assert!(repo.is_empty());
    }
}
