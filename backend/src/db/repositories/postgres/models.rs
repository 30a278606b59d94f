use diesel::prelude::*;

use super::schema::example_models;
use crate::models::{ExampleModel, ExampleModelId, NewExampleModel};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = example_models)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExampleModelRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<ExampleModelRow> for ExampleModel {
    fn from(row: ExampleModelRow) -> Self {
        Self {
            id: ExampleModelId(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

/// Column values for both INSERT and UPDATE.
///
/// `treat_none_as_null` makes an update with no description clear the column
/// instead of leaving it untouched.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = example_models)]
#[diesel(treat_none_as_null = true)]
pub struct ExampleModelChanges<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a NewExampleModel> for ExampleModelChanges<'a> {
    fn from(model: &'a NewExampleModel) -> Self {
        Self {
            name: &model.name,
            description: model.description.as_deref(),
        }
    }
}
