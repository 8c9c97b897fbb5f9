//! Database bootstrap and the unit of work that wraps every request's store operations.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, audit::create_audit_log_table, budget::create_budget_table,
    category::create_category_table, transaction::create_transaction_table,
};

/// The schema version written to `PRAGMA user_version` once the tables have been created.
///
/// A database with this version (or newer) is considered initialized and is left untouched.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the application's tables if the database has not been initialized yet.
///
/// Foreign key enforcement is switched on for `connection` regardless of whether the schema
/// needed creating, since SQLite disables it per connection by default.
///
/// # Errors
/// Returns an error if the tables could not be created or there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let version: i64 = connection.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version >= SCHEMA_VERSION {
        tracing::debug!("Database schema is at version {version}, skipping initialization.");
        return Ok(());
    }

    tracing::info!("Initializing database schema (version {SCHEMA_VERSION}).");

    let transaction = connection.unchecked_transaction()?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;
    create_audit_log_table(&transaction)?;
    transaction.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    transaction.commit()?;

    Ok(())
}

/// Run `work` as a single atomic unit against the store.
///
/// The unit is committed if `work` succeeds. If `work` returns an error, every write it made is
/// rolled back before the error is returned to the caller.
///
/// # Errors
/// Returns the error from `work`, or an [Error::SqlError] if the unit could not be started or
/// committed.
pub fn unit_of_work<T, F>(connection: &mut Connection, work: F) -> Result<T, Error>
where
    F: FnOnce(&SqlTransaction) -> Result<T, Error>,
{
    let transaction = connection.transaction()?;

    match work(&transaction) {
        Ok(value) => {
            transaction.commit()?;
            Ok(value)
        }
        Err(error) => {
            tracing::warn!("Rolling back unit of work: {error}");

            if let Err(rollback_error) = transaction.rollback() {
                tracing::error!("Could not roll back unit of work: {rollback_error}");
            }

            Err(error)
        }
    }
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns an [Error::DatabaseLockError] if the lock is poisoned.
pub fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}
