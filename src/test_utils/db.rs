use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, build_router,
    category::{Category, CategoryName, NewCategory, create_category},
    database_id::CategoryId,
    db::initialize,
    pagination::PaginationConfig,
    transaction::{NewTransaction, Transaction, create_transaction},
};

#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

#[track_caller]
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    AppState::new(connection, PaginationConfig::default()).expect("Could not create app state")
}

#[track_caller]
pub(crate) fn get_test_server() -> (TestServer, Arc<Mutex<Connection>>) {
    let state = get_test_app_state();
    let connection = state.db_connection.clone();
    let server = TestServer::new(build_router(state)).expect("Could not create test server.");

    (server, connection)
}

#[track_caller]
pub(crate) fn create_test_category(name: &str, connection: &Connection) -> Category {
    create_category(
        NewCategory {
            name: CategoryName::new_unchecked(name),
            description: None,
        },
        connection,
    )
    .expect("Could not create test category")
}

#[track_caller]
pub(crate) fn create_test_transaction(
    amount: f64,
    category_id: CategoryId,
    connection: &Connection,
) -> Transaction {
    create_transaction(NewTransaction::build(amount, category_id), connection)
        .expect("Could not create test transaction")
}
