//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use model_service::db::{ExampleModelRepository, RepositoryError, RepositoryResult};
use model_service::models::{ExampleModel, ExampleModelId, ExampleModelInput, NewExampleModel};
use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Repository whose every operation fails like an unreachable database.
#[derive(Debug, Default)]
pub struct FailingRepository;

impl FailingRepository {
    fn down(operation: &'static str) -> RepositoryError {
        RepositoryError::connection("connection refused")
            .in_operation(operation)
            .with_details("simulated outage")
    }
}

#[async_trait]
impl ExampleModelRepository for FailingRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Err(Self::down("health_check"))
    }

    async fn create_model(&self, _model: &NewExampleModel) -> RepositoryResult<ExampleModel> {
        Err(Self::down("create_model"))
    }

    async fn get_model(&self, _id: ExampleModelId) -> RepositoryResult<ExampleModel> {
        Err(Self::down("get_model"))
    }

    async fn list_models(&self) -> RepositoryResult<Vec<ExampleModel>> {
        Err(Self::down("list_models"))
    }

    async fn update_model(
        &self,
        _id: ExampleModelId,
        _model: &NewExampleModel,
    ) -> RepositoryResult<ExampleModel> {
        Err(Self::down("update_model"))
    }

    async fn delete_model(&self, _id: ExampleModelId) -> RepositoryResult<()> {
        Err(Self::down("delete_model"))
    }
}

/// Input with a name and a description derived from it.
pub fn sample_input(name: &str) -> ExampleModelInput {
    ExampleModelInput::named(name).with_description(format!("{} description", name))
}
