//! Repository trait and error types.

pub mod error;
pub mod example_model;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use example_model::ExampleModelRepository;
