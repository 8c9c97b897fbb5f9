use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::{lock_connection, unit_of_work},
    extract::{ApiJson, ApiPath},
    transaction::{Transaction, TransactionChanges, TransactionUpdateForm, update_transaction},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for partially updating a transaction.
///
/// Only the fields present in the request body are changed.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
    ApiJson(form): ApiJson<TransactionUpdateForm>,
) -> Result<Json<Transaction>, Error> {
    let changes = TransactionChanges::try_from(form)?;

    let mut connection = lock_connection(&state.db_connection)?;
    let transaction = unit_of_work(&mut connection, |sql_transaction| {
        update_transaction(transaction_id, changes, sql_transaction)
    })?;

    tracing::info!("Updated transaction {transaction_id}");

    Ok(Json(transaction))
}
