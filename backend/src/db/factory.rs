//! Repository selection at startup.
//!
//! The binary calls [`RepositoryFactory::from_env`] or
//! [`RepositoryFactory::from_repository_config`] once and hands the result to
//! the HTTP layer; nothing here is stored globally.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::{PostgresConfig, PostgresRepository};
use super::repository::{ExampleModelRepository, RepositoryError, RepositoryResult};

/// Storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RepositoryType {
    /// Postgres through Diesel
    Postgres,
    /// In-memory map, lost on restart
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Case-insensitive. Accepts `postgres`, `postgresql`, `pg`, `local` and
    /// `memory`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!(
                "unknown repository type '{}' (expected postgres or local)",
                s
            )),
        }
    }
}

impl TryFrom<String> for RepositoryType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Local => "local",
        })
    }
}

impl RepositoryType {
    /// Backend selected by the environment.
    ///
    /// `REPOSITORY_TYPE` wins when set and must name a known backend.
    /// Otherwise Postgres is chosen when `DATABASE_URL` or `PG_DATABASE_URL`
    /// is set, and Local when neither is.
    pub fn from_env() -> RepositoryResult<Self> {
        if let Ok(value) = std::env::var("REPOSITORY_TYPE") {
            return value
                .parse()
                .map_err(|e: String| RepositoryError::configuration(format!("REPOSITORY_TYPE: {}", e)));
        }

        if std::env::var_os("DATABASE_URL").is_some() || std::env::var_os("PG_DATABASE_URL").is_some()
        {
            Ok(Self::Postgres)
        } else {
            Ok(Self::Local)
        }
    }
}

/// Builds the repository the service runs against.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// An empty in-memory repository.
    pub fn create_local() -> Arc<dyn ExampleModelRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Repository selected and configured by environment variables.
    ///
    /// See [`RepositoryType::from_env`] and `PostgresConfig::from_env`.
    pub async fn from_env() -> RepositoryResult<Arc<dyn ExampleModelRepository>> {
        match RepositoryType::from_env()? {
            RepositoryType::Local => Ok(Self::create_local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => Self::connect_postgres(PostgresConfig::from_env()?).await,
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => Err(postgres_disabled()),
        }
    }

    /// Repository described by a parsed configuration file.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn ExampleModelRepository>> {
        match config.repository_type() {
            RepositoryType::Local => Ok(Self::create_local()),
            #[cfg(feature = "postgres-repo")]
            RepositoryType::Postgres => Self::connect_postgres(config.postgres_config()?).await,
            #[cfg(not(feature = "postgres-repo"))]
            RepositoryType::Postgres => Err(postgres_disabled()),
        }
    }

    /// Pool construction and migrations block, so they run off the async runtime.
    #[cfg(feature = "postgres-repo")]
    async fn connect_postgres(
        config: PostgresConfig,
    ) -> RepositoryResult<Arc<dyn ExampleModelRepository>> {
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| {
                RepositoryError::internal(format!("blocking task failed: {}", e))
                    .in_operation("connect")
            })??;
        Ok(Arc::new(repo))
    }
}

#[cfg(not(feature = "postgres-repo"))]
fn postgres_disabled() -> RepositoryError {
    RepositoryError::configuration("postgres repository requested but the postgres-repo feature is not enabled")
}
