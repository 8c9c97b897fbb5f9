//! Defines the endpoints for reading one transaction or a page of transactions.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::lock_connection,
    extract::{ApiPath, ApiQuery},
    pagination::{PageQuery, PaginationConfig},
    transaction::{Transaction, get_transaction, list_transactions},
};

/// The state needed to read transactions.
#[derive(Debug, Clone)]
pub struct GetTransactionState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The default and maximum page sizes.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for GetTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A route handler for getting a transaction by its database ID.
pub async fn get_transaction_endpoint(
    State(state): State<GetTransactionState>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_transaction(transaction_id, &connection).map(Json)
}

/// A route handler for listing transactions, paged by `offset` and `limit`.
pub async fn list_transactions_endpoint(
    State(state): State<GetTransactionState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let page = query.resolve(&state.pagination_config)?;
    let connection = lock_connection(&state.db_connection)?;

    list_transactions(page, &connection).map(Json)
}
