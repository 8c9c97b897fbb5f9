//! The budget: a single row tracking the total amount ever spent.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{Error, database_id::DatabaseId};

/// The ID of the one and only budget row.
pub const BUDGET_ID: DatabaseId = 1;

/// Running total of every transaction amount that has been recorded.
///
/// The total only grows: it is increased when a transaction is created and is not adjusted when
/// transactions are updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    /// Always [BUDGET_ID].
    pub id: DatabaseId,
    /// The sum of the amounts of every transaction ever created.
    pub total_spent: f64,
}

/// Get the budget, creating it with a total of zero if it does not exist yet.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_budget(connection: &Connection) -> Result<Budget, Error> {
    let created = connection.execute(
        "INSERT OR IGNORE INTO budget (id, total_spent) VALUES (?1, 0)",
        [BUDGET_ID],
    )?;

    if created > 0 {
        tracing::info!("Created budget");
    }

    connection
        .query_row(
            "SELECT id, total_spent FROM budget WHERE id = ?1",
            [BUDGET_ID],
            map_budget_row,
        )
        .map_err(|error| error.into())
}

/// Add `amount` to the total spent, creating the budget if needed.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn add_to_budget(amount: f64, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO budget (id, total_spent) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET total_spent = total_spent + excluded.total_spent",
        (BUDGET_ID, amount),
    )?;

    Ok(())
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            total_spent REAL NOT NULL DEFAULT 0 CHECK (total_spent >= 0)
        )",
        (),
    )?;

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        total_spent: row.get(1)?,
    })
}
