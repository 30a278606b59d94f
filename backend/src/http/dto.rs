//! Data Transfer Objects for the HTTP API.
//!
//! Entities travel as [`ExampleModel`] / [`ExampleModelInput`] directly; they
//! already derive Serialize/Deserialize with the wire field names.

use serde::{Deserialize, Serialize};

pub use crate::models::{ExampleModel, ExampleModelInput, FieldError};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Database connection status
    pub database: String,
}
