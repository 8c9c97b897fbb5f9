//! Endpoints for reading one category or a page of categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_category, list_categories},
    database_id::CategoryId,
    db::lock_connection,
    extract::{ApiPath, ApiQuery},
    pagination::{PageQuery, PaginationConfig},
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct GetCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for GetCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Get a single category, or `404 Not Found` if it does not exist.
pub async fn get_category_endpoint(
    State(state): State<GetCategoryState>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<Json<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category(category_id, &connection).map(Json)
}

/// List categories in the order they were created, paged by `offset` and `limit`.
pub async fn list_categories_endpoint(
    State(state): State<GetCategoryState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Category>>, Error> {
    let page = query.resolve(&state.pagination_config)?;
    let connection = lock_connection(&state.db_connection)?;

    list_categories(page, &connection).map(Json)
}
