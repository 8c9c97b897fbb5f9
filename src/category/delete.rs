//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::delete_category,
    database_id::CategoryId,
    db::{lock_connection, unit_of_work},
    extract::ApiPath,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a category, responding with `204 No Content`.
///
/// Categories that still have transactions are rejected with `409 Conflict`.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;

    unit_of_work(&mut connection, |transaction| {
        delete_category(category_id, transaction)
    })?;

    tracing::info!("Deleted category {category_id}");

    Ok(StatusCode::NO_CONTENT)
}
