//! Database module for example model storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Input validation                                     │
//! │  - Logging                                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼──────┐
//! │ PostgresRepository│   │ LocalRepository  │
//! │ (Diesel + r2d2)   │   │ (in-memory)      │
//! └──────────────────┘   └──────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use model_service::db::{services, RepositoryFactory};
//! use model_service::models::ExampleModelInput;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let created = services::create_model(repo.as_ref(), &ExampleModelInput::named("A")).await?;
//!     let all = services::list_models(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```
//!
//! Repositories are constructed explicitly and passed to whoever needs them;
//! this module keeps no process-wide instance.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(feature = "postgres-repo")]
pub use repositories::{PoolStats, PostgresConfig, PostgresRepository};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, ExampleModelRepository, RepositoryError, RepositoryResult,
};
