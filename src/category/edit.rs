//! Category partial update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryChanges, CategoryUpdateForm, update_category},
    database_id::CategoryId,
    db::{lock_connection, unit_of_work},
    extract::{ApiJson, ApiPath},
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Update the fields present in the request body and respond with the updated category.
pub async fn update_category_endpoint(
    State(state): State<UpdateCategoryState>,
    ApiPath(category_id): ApiPath<CategoryId>,
    ApiJson(form): ApiJson<CategoryUpdateForm>,
) -> Result<Json<Category>, Error> {
    let changes = CategoryChanges::try_from(form)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let category = unit_of_work(&mut connection, |transaction| {
        update_category(category_id, changes, transaction)
    })?;

    tracing::info!("Updated category {category_id}");

    Ok(Json(category))
}
