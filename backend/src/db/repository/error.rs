//! Errors raised by repositories and the service layer.
//!
//! The HTTP layer maps these variants onto status codes; nothing below it knows
//! about HTTP.

use std::fmt;

use crate::models::{ExampleModelId, FieldError};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a failure happened, for logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Repository or service operation, e.g. `update_model`.
    pub operation: Option<&'static str>,
    /// Record the operation targeted.
    pub model_id: Option<ExampleModelId>,
    pub details: Option<String>,
    /// Set when the same request may succeed later. Nothing in this crate
    /// acts on it besides reporting.
    pub transient: bool,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(4);
        if let Some(op) = self.operation {
            parts.push(format!("op={}", op));
        }
        if let Some(id) = self.model_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(details.clone());
        }
        if self.transient {
            parts.push("transient".to_string());
        }
        if parts.is_empty() {
            Ok(())
        } else {
            write!(f, " ({})", parts.join(", "))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached or a pooled connection was unavailable.
    #[error("connection failed: {message}{context}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    /// The store rejected a statement.
    #[error("query failed: {message}{context}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    #[error("{message}{context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Input rejected before reaching the store.
    #[error("invalid input: {message}{context}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
        context: ErrorContext,
    },

    /// Startup settings are missing or malformed.
    #[error("configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Failures that are neither the client's nor the store's, such as a
    /// panicked blocking task or a failed migration.
    #[error("internal error: {message}{context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context: ErrorContext {
                transient: true,
                ..Default::default()
            },
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// No example model has identifier `id`.
    pub fn not_found(id: ExampleModelId) -> Self {
        Self::NotFound {
            message: format!("example model {} not found", id),
            context: ErrorContext {
                model_id: Some(id),
                ..Default::default()
            },
        }
    }

    pub fn validation(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Record the operation that failed. Later calls overwrite earlier ones.
    pub fn in_operation(mut self, operation: &'static str) -> Self {
        self.context_mut().operation = Some(operation);
        self
    }

    pub fn for_model(mut self, id: ExampleModelId) -> Self {
        self.context_mut().model_id = Some(id);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.context_mut().details = Some(details.into());
        self
    }

    /// Mark the failure as one that may go away on its own.
    pub fn transient(mut self) -> Self {
        self.context_mut().transient = true;
        self
    }

    pub fn is_transient(&self) -> bool {
        self.context().transient
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Fields that failed validation; empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message, .. }
            | Self::Query { message, .. }
            | Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Configuration { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => context,
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                RepositoryError::connection(info.message())
            }
            Error::DatabaseError(kind, info) => {
                let err = RepositoryError::query(info.message())
                    .with_details(format!("kind={:?}", kind));
                if matches!(kind, DatabaseErrorKind::SerializationFailure) {
                    err.transient()
                } else {
                    err
                }
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("could not decode row: {}", e))
            }
            Error::SerializationError(e) => {
                RepositoryError::internal(format!("could not encode value: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection(err.to_string()).with_details("pool checkout")
    }
}
