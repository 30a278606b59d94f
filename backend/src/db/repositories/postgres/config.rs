//! Connection settings for [`super::PostgresRepository`].

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::db::repository::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Connections the pool keeps open while idle.
    pub min_connections: u32,
    /// How long an operation waits for a pooled connection.
    pub connect_timeout: Duration,
    /// Idle connections above `min_connections` are closed after this long.
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    /// Settings for `database_url` with default pool sizing.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Read settings from the environment.
    ///
    /// | variable                          | default  |
    /// |-----------------------------------|----------|
    /// | `DATABASE_URL` / `PG_DATABASE_URL`| required |
    /// | `PG_POOL_MAX`                     | 10       |
    /// | `PG_POOL_MIN`                     | 1        |
    /// | `PG_CONN_TIMEOUT_SEC`             | 30       |
    /// | `PG_IDLE_TIMEOUT_SEC`             | 600      |
    ///
    /// A variable that is set but does not parse is an error; it never falls
    /// back to the default.
    pub fn from_env() -> RepositoryResult<Self> {
        let url = env::var("DATABASE_URL")
            .or_else(|_| env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::configuration("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;

        let mut config = Self::new(url);
        if let Some(n) = parse_var("PG_POOL_MAX")? {
            config.max_connections = n;
        }
        if let Some(n) = parse_var("PG_POOL_MIN")? {
            config.min_connections = n;
        }
        if let Some(secs) = parse_var("PG_CONN_TIMEOUT_SEC")? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var("PG_IDLE_TIMEOUT_SEC")? {
            config.idle_timeout = Duration::from_secs(secs);
        }

        config.check()?;
        Ok(config)
    }

    /// Reject settings the connection pool cannot be built with.
    pub fn check(&self) -> RepositoryResult<()> {
        let problem = if self.database_url.trim().is_empty() {
            "database URL must not be empty"
        } else if self.max_connections == 0 {
            "max_connections must be at least 1"
        } else if self.min_connections > self.max_connections {
            "min_connections must not exceed max_connections"
        } else if self.connect_timeout.is_zero() {
            "connect_timeout must be positive"
        } else if self.idle_timeout.is_zero() {
            "idle_timeout must be positive"
        } else {
            return Ok(());
        };
        Err(RepositoryError::configuration(problem))
    }
}

fn parse_var<T: FromStr>(key: &str) -> RepositoryResult<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            RepositoryError::configuration(format!(
                "{} must be a non-negative integer, got '{}'",
                key, raw
            ))
        }),
        Err(_) => Ok(None),
    }
}
