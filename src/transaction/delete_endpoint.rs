use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::{lock_connection, unit_of_work},
    extract::ApiPath,
    transaction::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with `204 No Content`.
///
/// The budget is left as is, it only ever grows when transactions are created.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<StatusCode, Error> {
    let mut connection = lock_connection(&state.db_connection)?;

    unit_of_work(&mut connection, |sql_transaction| {
        delete_transaction(transaction_id, sql_transaction)
    })?;

    tracing::info!("Deleted transaction {transaction_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};

    use crate::{
        Error,
        audit::{AuditOperation, list_audit_records},
        budget::get_budget,
        extract::ApiPath,
        pagination::Page,
        test_utils::{create_test_category, create_test_transaction, get_test_connection},
        transaction::get_transaction,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    #[tokio::test]
    async fn deletes_transaction() {
        let connection = get_test_connection();
        let category = create_test_category("Food", &connection);
        let transaction = create_test_transaction(1.23, category.id, &connection);
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let status = delete_transaction_endpoint(State(state.clone()), ApiPath(transaction.id)).await;

        assert_eq!(status, Ok(StatusCode::NO_CONTENT));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(transaction.id, &connection),
            Err(Error::TransactionNotFound(transaction.id))
        );

        let records = list_audit_records(Page::default(), &connection).unwrap();
        assert_eq!(records[0].operation, AuditOperation::Delete);
        assert_eq!(records[0].old_amount, Some(1.23));
        assert_eq!(records[0].new_amount, None);

        assert_eq!(get_budget(&connection).unwrap().total_spent, 1.23);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let result = delete_transaction_endpoint(State(state), ApiPath(9)).await;

        assert_eq!(result, Err(Error::TransactionNotFound(9)));
    }
}
