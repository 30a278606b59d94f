//! The `ExampleModel` entity and its input validation.
//!
//! Three shapes of the same record exist:
//!
//! - [`ExampleModelInput`]: what a client sends. Every field is optional so that
//!   missing values surface as field-level validation errors.
//! - [`NewExampleModel`]: a validated payload without an identifier, ready to be
//!   inserted or written over an existing row.
//! - [`ExampleModel`]: a stored record, identifier included.

use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, ExampleModelId);

/// Maximum length of `name`, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum length of `description`, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 500;

// Postgres text columns cannot store U+0000.
const NUL_REASON: &str = "must not contain NUL characters";

/// A persisted example model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleModel {
    /// Store-assigned identifier, immutable once assigned.
    pub id: ExampleModelId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExampleModel {
    /// Build the stored record for `id` from a validated payload.
    pub fn from_new(id: ExampleModelId, model: &NewExampleModel) -> Self {
        Self {
            id,
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }
}

/// Validated fields of an example model, without identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExampleModel {
    pub name: String,
    pub description: Option<String>,
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field path as seen by the client (e.g. `name`).
    pub field: String,
    /// Machine-readable reason (e.g. `required`, `too_long`).
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Raw request payload for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleModelInput {
    /// Must be an integer when present. Ignored on create; on update it must
    /// match the target identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExampleModelInput {
    /// Input carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check every field and produce the normalized payload.
    ///
    /// Names and descriptions are trimmed; a blank description is treated as
    /// absent. All failing fields are reported, not only the first one.
    pub fn validate(&self) -> Result<NewExampleModel, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name.as_deref().map(str::trim) {
            None => {
                errors.push(FieldError::new("name", "required"));
                None
            }
            Some("") => {
                errors.push(FieldError::new("name", "must not be blank"));
                None
            }
            Some(n) if n.contains('\0') => {
                errors.push(FieldError::new("name", NUL_REASON));
                None
            }
            Some(n) if n.chars().count() > NAME_MAX_LEN => {
                errors.push(FieldError::new(
                    "name",
                    format!("must be at most {} characters", NAME_MAX_LEN),
                ));
                None
            }
            Some(n) => Some(n.to_string()),
        };

        let description = match self.description.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(d) if d.contains('\0') => {
                errors.push(FieldError::new("description", NUL_REASON));
                None
            }
            Some(d) if d.chars().count() > DESCRIPTION_MAX_LEN => {
                errors.push(FieldError::new(
                    "description",
                    format!("must be at most {} characters", DESCRIPTION_MAX_LEN),
                ));
                None
            }
            Some(d) => Some(d.to_string()),
        };

        match name {
            Some(name) if errors.is_empty() => Ok(NewExampleModel { name, description }),
            _ => Err(errors),
        }
    }
}
