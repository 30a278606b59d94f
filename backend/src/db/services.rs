//! Service layer for example model operations.
//!
//! These functions are what the application calls. They validate raw input,
//! delegate to any [`ExampleModelRepository`] and log the outcome. Every
//! function performs at most one repository call.

use super::repository::{ExampleModelRepository, RepositoryError, RepositoryResult};
use crate::models::{ExampleModel, ExampleModelId, ExampleModelInput, FieldError, NewExampleModel};

/// Check that the underlying store is reachable.
pub async fn health_check<R: ExampleModelRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Validate `input` and insert it as a new record.
///
/// Any identifier carried by `input` is ignored; the store assigns one.
pub async fn create_model<R: ExampleModelRepository + ?Sized>(
    repo: &R,
    input: &ExampleModelInput,
) -> RepositoryResult<ExampleModel> {
    let model = validate_input(input).map_err(|e| e.in_operation("create_model"))?;
    let created = repo.create_model(&model).await?;
    log::info!("created example model {}", created.id);
    Ok(created)
}

/// Fetch a single record.
pub async fn get_model<R: ExampleModelRepository + ?Sized>(
    repo: &R,
    id: ExampleModelId,
) -> RepositoryResult<ExampleModel> {
    repo.get_model(id).await
}

/// Fetch every record, ordered by identifier.
pub async fn list_models<R: ExampleModelRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ExampleModel>> {
    repo.list_models().await
}

/// Validate `input` and overwrite the record `id` with it.
///
/// When `input` carries an identifier it must equal `id`.
pub async fn update_model<R: ExampleModelRepository + ?Sized>(
    repo: &R,
    id: ExampleModelId,
    input: &ExampleModelInput,
) -> RepositoryResult<ExampleModel> {
    let mismatch = input
        .id
        .filter(|body_id| *body_id != id.value())
        .map(|_| FieldError::new("id", format!("does not match the target id {}", id)));

    let model = match (mismatch, validate_input(input)) {
        (None, result) => result,
        (Some(id_error), Ok(_)) => Err(invalid(vec![id_error])),
        (Some(id_error), Err(e)) => {
            let mut fields = vec![id_error];
            fields.extend_from_slice(e.field_errors());
            Err(invalid(fields))
        }
    }
    .map_err(|e| e.in_operation("update_model").for_model(id))?;

    let updated = repo.update_model(id, &model).await?;
    log::info!("updated example model {}", updated.id);
    Ok(updated)
}

/// Permanently delete the record `id`.
pub async fn delete_model<R: ExampleModelRepository + ?Sized>(
    repo: &R,
    id: ExampleModelId,
) -> RepositoryResult<()> {
    repo.delete_model(id).await?;
    log::info!("deleted example model {}", id);
    Ok(())
}

fn validate_input(input: &ExampleModelInput) -> RepositoryResult<NewExampleModel> {
    input.validate().map_err(|fields| {
        log::debug!("rejected example model input: {} invalid field(s)", fields.len());
        invalid(fields)
    })
}

fn invalid(fields: Vec<FieldError>) -> RepositoryError {
    RepositoryError::validation("Invalid example model", fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_touching_store() {
        let repo = LocalRepository::new();
        let err = create_model(&repo, &ExampleModelInput::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "name");
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_ignores_body_id() {
        let repo = LocalRepository::new();
        let created = create_model(&repo, &ExampleModelInput::named("A").with_id(99))
            .await
            .unwrap();
        assert_eq!(created.id.value(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_mismatched_id() {
        let repo = LocalRepository::new();
        let created = create_model(&repo, &ExampleModelInput::named("A"))
            .await
            .unwrap();

        let err = update_model(&repo, created.id, &ExampleModelInput::named("B").with_id(42))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "id");

        let unchanged = get_model(&repo, created.id).await.unwrap();
        assert_eq!(unchanged.name, "A");
    }

    #[tokio::test]
    async fn test_update_accepts_matching_id() {
        let repo = LocalRepository::new();
        let created = create_model(&repo, &ExampleModelInput::named("A"))
            .await
            .unwrap();
        let updated = update_model(
            &repo,
            created.id,
            &ExampleModelInput::named("B").with_id(created.id.value()),
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "B");
    }

    #[tokio::test]
    async fn test_update_validation_precedes_not_found() {
        let repo = LocalRepository::new();
        let err = update_model(&repo, ExampleModelId::new(5), &ExampleModelInput::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_nul_in_name_is_a_validation_error() {
        let repo = LocalRepository::new();
        let err = create_model(&repo, &ExampleModelInput::named("a\u{0}b"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "name");
        assert_eq!(err.context().operation, Some("create_model"));
        assert!(repo.is_empty());
    }
}
