//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::{lock_connection, unit_of_work},
    extract::ApiJson,
    transaction::{NewTransaction, Transaction, TransactionForm, create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with `201 Created` and the stored
/// transaction on success.
///
/// The transaction, its audit record and the budget update are committed together.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    ApiJson(form): ApiJson<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let new_transaction = NewTransaction::try_from(form)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = unit_of_work(&mut connection, |sql_transaction| {
        create_transaction(new_transaction, sql_transaction)
    })?;

    tracing::info!(
        "Created transaction {} of {} in category {}",
        transaction.id,
        transaction.amount,
        transaction.category_id
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}
