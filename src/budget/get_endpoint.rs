use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{Budget, get_budget},
    db::{lock_connection, unit_of_work},
};

/// The state needed to read the budget.
#[derive(Debug, Clone)]
pub struct BudgetState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for getting the budget.
///
/// The first request creates the budget with a total of zero.
pub async fn get_budget_endpoint(State(state): State<BudgetState>) -> Result<Json<Budget>, Error> {
    let mut connection = lock_connection(&state.db_connection)?;

    unit_of_work(&mut connection, |transaction| get_budget(transaction)).map(Json)
}
