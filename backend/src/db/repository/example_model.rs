//! Repository trait for example model CRUD operations.
//!
//! Every method performs a single round-trip against the store. Implementations
//! acquire whatever connection they need for the duration of the call and
//! release it before returning, on success and on error alike.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ExampleModel, ExampleModelId, NewExampleModel};

/// Repository trait for the `example_models` collection.
///
/// Callers are expected to pass payloads that already went through
/// [`crate::models::ExampleModelInput::validate`]; see [`crate::db::services`].
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ExampleModelRepository: Send + Sync {
    /// Check that the store is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` - The store answered
    /// * `Err(RepositoryError)` - If the round-trip fails
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new record and return it with its store-assigned identifier.
    ///
    /// # Arguments
    /// * `model` - Validated fields of the new record
    ///
    /// # Returns
    /// * `Ok(ExampleModel)` - The stored record
    /// * `Err(RepositoryError)` - If the insert fails
    async fn create_model(&self, model: &NewExampleModel) -> RepositoryResult<ExampleModel>;

    /// Fetch one record by identifier.
    ///
    /// # Returns
    /// * `Ok(ExampleModel)` - The matching record
    /// * `Err(RepositoryError::NotFound)` - If no record has this identifier
    async fn get_model(&self, id: ExampleModelId) -> RepositoryResult<ExampleModel>;

    /// Fetch every record, ordered by identifier ascending.
    async fn list_models(&self) -> RepositoryResult<Vec<ExampleModel>>;

    /// Replace all mutable fields of the record with identifier `id`.
    ///
    /// # Arguments
    /// * `id` - Identifier of the record to overwrite; it is never changed
    /// * `model` - Validated replacement fields
    ///
    /// # Returns
    /// * `Ok(ExampleModel)` - The record after the update
    /// * `Err(RepositoryError::NotFound)` - If no record has this identifier
    async fn update_model(
        &self,
        id: ExampleModelId,
        model: &NewExampleModel,
    ) -> RepositoryResult<ExampleModel>;

    /// Permanently remove the record with identifier `id`.
    ///
    /// # Returns
    /// * `Ok(())` - The record was deleted
    /// * `Err(RepositoryError::NotFound)` - If no record has this identifier
    async fn delete_model(&self, id: ExampleModelId) -> RepositoryResult<()>;
}
