//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`].

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    Json,
};

use super::dto::{ExampleModel, ExampleModelInput, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::ExampleModelId;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Readiness: 200 when the store answers, 503 otherwise.
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => (StatusCode::OK, "connected"),
        Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "disconnected"),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "unavailable" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };
    (status, Json(body))
}

/// GET /alive
///
/// Liveness: the process is serving requests. Does not touch the store.
pub async fn alive() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// Example model CRUD
// =============================================================================

/// GET /entities
///
/// List all example models, ordered by id. An empty store yields `[]`.
pub async fn list_models(State(state): State<AppState>) -> HandlerResult<Vec<ExampleModel>> {
    let models = db_services::list_models(state.repository.as_ref()).await?;
    Ok(Json(models))
}

/// POST /entities
///
/// Create an example model. Responds 201 with the stored record.
pub async fn create_model(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ExampleModel>), AppError> {
    let input = parse_input(&body)?;
    let created = db_services::create_model(state.repository.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /entities/{id}
pub async fn get_model(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<ExampleModel> {
    let id = parse_id(id)?;
    let model = db_services::get_model(state.repository.as_ref(), id).await?;
    Ok(Json(model))
}

/// PUT /entities/{id}
///
/// Replace every mutable field of an example model.
pub async fn update_model(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> HandlerResult<ExampleModel> {
    let id = parse_id(id)?;
    let input = parse_input(&body)?;
    let updated = db_services::update_model(state.repository.as_ref(), id, &input).await?;
    Ok(Json(updated))
}

/// DELETE /entities/{id}
///
/// Responds 204 with no body.
pub async fn delete_model(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    db_services::delete_model(state.repository.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unmatched routes, so every error body has the same shape.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// =============================================================================
// Request parsing
// =============================================================================

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<ExampleModelId, AppError> {
    match id {
        Ok(Path(id)) => Ok(ExampleModelId::new(id)),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected path parameter");
            Err(AppError::BadRequest(format!(
                "Invalid id: {}",
                rejection.body_text()
            )))
        }
    }
}

/// Parse a JSON body into an [`ExampleModelInput`].
///
/// The `Content-Type` header is not inspected. Type mismatches are reported
/// against the offending field path.
fn parse_input(body: &[u8]) -> Result<ExampleModelInput, AppError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))?;

    if !value.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_path_to_error::deserialize(value).map_err(|err| {
        let field = err.path().to_string();
        AppError::field(field, err.into_inner().to_string())
    })
}
