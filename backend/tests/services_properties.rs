//! Property tests for the service layer over the in-memory repository.

mod support;

use model_service::db::{services, LocalRepository};
use model_service::models::{ExampleModelId, ExampleModelInput, NAME_MAX_LEN};
use proptest::prelude::*;
use support::{sample_input, FailingRepository};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn valid_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _-]{0,40}[A-Za-z0-9]"
}

fn valid_description() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z]{1,20}( [a-z]{1,20}){0,5}")
}

fn input_of(name: &str, description: &Option<String>) -> ExampleModelInput {
    let input = ExampleModelInput::named(name);
    match description {
        Some(d) => input.with_description(d.clone()),
        None => input,
    }
}

proptest! {
    #[test]
    fn create_then_get_returns_same_record(
        name in valid_name(),
        description in valid_description(),
    ) {
        let rt = runtime();
        let repo = LocalRepository::new();
        let input = input_of(&name, &description);

        let created = rt.block_on(services::create_model(&repo, &input)).unwrap();
        let fetched = rt.block_on(services::get_model(&repo, created.id)).unwrap();

        prop_assert_eq!(&created, &fetched);
        prop_assert_eq!(created.name, name);
        prop_assert_eq!(created.description, description);
    }

    #[test]
    fn list_length_is_created_minus_deleted(
        created in 1usize..20,
        deletions in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let rt = runtime();
        let repo = LocalRepository::new();

        let mut ids = Vec::new();
        for i in 0..created {
            let model = rt
                .block_on(services::create_model(&repo, &sample_input(&format!("m{}", i))))
                .unwrap();
            ids.push(model.id);
        }

        let mut deleted = 0;
        for index in deletions {
            if ids.is_empty() {
                break;
            }
            let id = ids.remove(index.index(ids.len()));
            rt.block_on(services::delete_model(&repo, id)).unwrap();
            deleted += 1;
        }

        let listed = rt.block_on(services::list_models(&repo)).unwrap();
        prop_assert_eq!(listed.len(), created - deleted);

        let listed_ids: Vec<ExampleModelId> = listed.iter().map(|m| m.id).collect();
        prop_assert_eq!(listed_ids, ids);
    }

    #[test]
    fn update_keeps_identifier(
        first in valid_name(),
        second in valid_name(),
        description in valid_description(),
    ) {
        let rt = runtime();
        let repo = LocalRepository::new();

        let created = rt
            .block_on(services::create_model(&repo, &ExampleModelInput::named(first)))
            .unwrap();
        let updated = rt
            .block_on(services::update_model(&repo, created.id, &input_of(&second, &description)))
            .unwrap();

        prop_assert_eq!(updated.id, created.id);
        prop_assert_eq!(&updated.name, &second);
        prop_assert_eq!(&updated.description, &description);

        let fetched = rt.block_on(services::get_model(&repo, created.id)).unwrap();
        prop_assert_eq!(fetched, updated);
    }

    #[test]
    fn overlong_names_are_rejected(extra in 1usize..50) {
        let rt = runtime();
        let repo = LocalRepository::new();
        let name = "x".repeat(NAME_MAX_LEN + extra);

        let err = rt
            .block_on(services::create_model(&repo, &ExampleModelInput::named(name)))
            .unwrap_err();

        prop_assert!(err.is_validation());
        prop_assert_eq!(err.field_errors()[0].field.as_str(), "name");
        prop_assert!(repo.is_empty());
    }
}

#[tokio::test]
async fn get_after_delete_is_not_found() {
    let repo = LocalRepository::new();
    let created = services::create_model(&repo, &sample_input("A"))
        .await
        .unwrap();

    services::delete_model(&repo, created.id).await.unwrap();

    let err = services::get_model(&repo, created.id).await.unwrap_err();
    assert!(err.is_not_found());
    let err = services::delete_model(&repo, created.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn identifiers_are_not_reused() {
    let repo = LocalRepository::new();
    let first = services::create_model(&repo, &sample_input("A"))
        .await
        .unwrap();
    services::delete_model(&repo, first.id).await.unwrap();

    let second = services::create_model(&repo, &sample_input("B"))
        .await
        .unwrap();
    assert!(second.id.value() > first.id.value());
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::update_model(&repo, ExampleModelId::new(7), &sample_input("A"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(repo.is_empty());
}

#[tokio::test]
async fn update_without_description_clears_it() {
    let repo = LocalRepository::new();
    let created = services::create_model(&repo, &sample_input("A"))
        .await
        .unwrap();
    assert!(created.description.is_some());

    let updated = services::update_model(&repo, created.id, &ExampleModelInput::named("A"))
        .await
        .unwrap();
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn store_errors_surface_unchanged() {
    let repo = FailingRepository;

    let err = services::list_models(&repo).await.unwrap_err();
    assert!(err.is_transient());
    assert!(!err.is_not_found());
    assert_eq!(err.context().operation, Some("list_models"));

    // Validation runs before the store is reached.
    let err = services::create_model(&repo, &ExampleModelInput::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
}
