//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryForm, NewCategory, create_category},
    db::{lock_connection, unit_of_work},
    extract::ApiJson,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a category, responding with `201 Created` and the stored category.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    ApiJson(form): ApiJson<CategoryForm>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let new_category = NewCategory::try_from(form)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let category = unit_of_work(&mut connection, |transaction| {
        create_category(new_category, transaction)
    })?;

    tracing::info!("Created category {} \"{}\"", category.id, category.name);

    Ok((StatusCode::CREATED, Json(category)))
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};

    use crate::{
        Error,
        category::{CategoryForm, count_categories, create_category_endpoint, get_category},
        extract::ApiJson,
        test_utils::get_test_connection,
    };

    use super::CreateCategoryState;

    fn get_category_state() -> CreateCategoryState {
        CreateCategoryState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn can_create_category() {
        let state = get_category_state();
        let form = CategoryForm {
            name: "Foo".to_owned(),
            description: None,
        };

        let (status, category) = create_category_endpoint(State(state.clone()), ApiJson(form))
            .await
            .expect("Could not create category");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(category.name.as_ref(), "Foo");
        assert_eq!(
            Ok(category.0.clone()),
            get_category(category.id, &state.db_connection.lock().unwrap())
        );
    }

    #[tokio::test]
    async fn create_category_fails_on_empty_name() {
        let state = get_category_state();
        let form = CategoryForm {
            name: "".to_owned(),
            description: None,
        };

        let result = create_category_endpoint(State(state.clone()), ApiJson(form)).await;

        assert_eq!(result.err(), Some(Error::EmptyCategoryName));
        assert_eq!(
            count_categories(&state.db_connection.lock().unwrap()),
            Ok(0)
        );
    }
}
