//! The audit log: an append-only history of every change made to transactions.

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{AuditLogId, CategoryId, TransactionId},
    pagination::Page,
    transaction::Transaction,
};

/// The kind of change that an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    /// A transaction was created.
    Insert,
    /// A transaction was changed.
    Update,
    /// A transaction was deleted.
    Delete,
}

impl AuditOperation {
    /// The name of the operation as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Insert => "INSERT",
            AuditOperation::Update => "UPDATE",
            AuditOperation::Delete => "DELETE",
        }
    }
}

impl ToSql for AuditOperation {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for AuditOperation {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "INSERT" => Ok(AuditOperation::Insert),
            "UPDATE" => Ok(AuditOperation::Update),
            "DELETE" => Ok(AuditOperation::Delete),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A single entry in the audit log.
///
/// `old_*` fields hold the transaction's values before the change and are empty for inserts.
/// `new_*` fields hold the values after the change and are empty for deletes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct AuditRecord {
    pub id: AuditLogId,
    pub operation: AuditOperation,
    /// The transaction that was changed. It may no longer exist.
    pub transaction_id: TransactionId,
    pub old_amount: Option<f64>,
    pub new_amount: Option<f64>,
    pub old_description: Option<String>,
    pub new_description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub old_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub new_date: Option<OffsetDateTime>,
    pub old_category_id: Option<CategoryId>,
    pub new_category_id: Option<CategoryId>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// Write an `INSERT` record for a newly created transaction.
pub fn record_transaction_insert(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    insert_audit_record(
        AuditOperation::Insert,
        transaction.id,
        None,
        Some(transaction),
        connection,
    )
}

/// Write an `UPDATE` record with the transaction's values before and after the change.
pub fn record_transaction_update(
    old: &Transaction,
    new: &Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    insert_audit_record(
        AuditOperation::Update,
        new.id,
        Some(old),
        Some(new),
        connection,
    )
}

/// Write a `DELETE` record with the last values of a deleted transaction.
pub fn record_transaction_delete(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<(), Error> {
    insert_audit_record(
        AuditOperation::Delete,
        transaction.id,
        Some(transaction),
        None,
        connection,
    )
}

fn insert_audit_record(
    operation: AuditOperation,
    transaction_id: TransactionId,
    old: Option<&Transaction>,
    new: Option<&Transaction>,
    connection: &Connection,
) -> Result<(), Error> {
    let description =
        |transaction: &Transaction| transaction.description.as_ref().map(|d| d.to_string());

    connection.execute(
        "INSERT INTO audit_log (
            operation, transaction_id,
            old_amount, new_amount,
            old_description, new_description,
            old_date, new_date,
            old_category_id, new_category_id,
            logged_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        (
            operation,
            transaction_id,
            old.map(|t| t.amount),
            new.map(|t| t.amount),
            old.and_then(description),
            new.and_then(description),
            old.map(|t| t.date),
            new.map(|t| t.date),
            old.map(|t| t.category_id),
            new.map(|t| t.category_id),
            OffsetDateTime::now_utc(),
        ),
    )?;

    tracing::debug!("Recorded {} of transaction {transaction_id}", operation.as_str());

    Ok(())
}

/// Retrieve a page of audit records, newest first.
///
/// Records written within the same instant are ordered by descending ID so that the most recent
/// write always comes first.
pub fn list_audit_records(page: Page, connection: &Connection) -> Result<Vec<AuditRecord>, Error> {
    connection
        .prepare(
            "SELECT id, operation, transaction_id,
                old_amount, new_amount,
                old_description, new_description,
                old_date, new_date,
                old_category_id, new_category_id,
                logged_at
             FROM audit_log
             ORDER BY logged_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?
        .query_map((page.limit, page.offset), map_audit_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Create the audit log table in the database.
///
/// There is no foreign key to the transaction table since records must outlive the transactions
/// they describe.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_audit_log_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS audit_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            operation TEXT NOT NULL CHECK (operation IN ('INSERT', 'UPDATE', 'DELETE')),
            transaction_id INTEGER NOT NULL,
            old_amount REAL,
            new_amount REAL,
            old_description TEXT,
            new_description TEXT,
            old_date TEXT,
            new_date TEXT,
            old_category_id INTEGER,
            new_category_id INTEGER,
            logged_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_log_logged_at ON audit_log(logged_at);",
    )?;

    Ok(())
}

fn map_audit_row(row: &Row) -> Result<AuditRecord, rusqlite::Error> {
    Ok(AuditRecord {
        id: row.get(0)?,
        operation: row.get(1)?,
        transaction_id: row.get(2)?,
        old_amount: row.get(3)?,
        new_amount: row.get(4)?,
        old_description: row.get(5)?,
        new_description: row.get(6)?,
        old_date: row.get(7)?,
        new_date: row.get(8)?,
        old_category_id: row.get(9)?,
        new_category_id: row.get(10)?,
        logged_at: row.get(11)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        audit::{AuditOperation, list_audit_records},
        description::Description,
        pagination::Page,
        patch::Patch,
        test_utils::{create_test_category, create_test_transaction, get_test_connection},
        transaction::{
            NewTransaction, TransactionChanges, create_transaction, delete_transaction,
            update_transaction,
        },
    };

    #[test]
    fn insert_records_new_values_only() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let transaction = create_transaction(
            NewTransaction::build(20.0, category.id)
                .description(Description::new("Market").unwrap()),
            &conn,
        )
        .unwrap();

        let records = list_audit_records(Page::default(), &conn).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.operation, AuditOperation::Insert);
        assert_eq!(record.transaction_id, transaction.id);
        assert_eq!(record.old_amount, None);
        assert_eq!(record.old_description, None);
        assert_eq!(record.old_date, None);
        assert_eq!(record.old_category_id, None);
        assert_eq!(record.new_amount, Some(20.0));
        assert_eq!(record.new_description.as_deref(), Some("Market"));
        assert_eq!(record.new_date, Some(transaction.date));
        assert_eq!(record.new_category_id, Some(category.id));
    }

    #[test]
    fn update_records_old_and_new_values() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        let rent = create_test_category("Rent", &conn);
        let transaction = create_test_transaction(20.0, food.id, &conn);

        update_transaction(
            transaction.id,
            TransactionChanges {
                category_id: Patch::Present(rent.id),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        let records = list_audit_records(Page::default(), &conn).unwrap();
        let record = &records[0];
        assert_eq!(record.operation, AuditOperation::Update);
        assert_eq!(record.old_category_id, Some(food.id));
        assert_eq!(record.new_category_id, Some(rent.id));
        assert_eq!(record.old_amount, Some(20.0));
        assert_eq!(record.new_amount, Some(20.0));
    }

    #[test]
    fn lists_newest_first() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let transaction = create_test_transaction(5.0, category.id, &conn);
        update_transaction(
            transaction.id,
            TransactionChanges {
                amount: Patch::Present(6.0),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();
        delete_transaction(transaction.id, &conn).unwrap();

        let records = list_audit_records(Page::default(), &conn).unwrap();

        let operations: Vec<_> = records.iter().map(|record| record.operation).collect();
        assert_eq!(
            operations,
            vec![
                AuditOperation::Delete,
                AuditOperation::Update,
                AuditOperation::Insert
            ]
        );
        assert!(
            records
                .iter()
                .all(|record| record.transaction_id == transaction.id)
        );
    }

    #[test]
    fn list_is_paged() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        for i in 1..=4 {
            create_test_transaction(i as f64, category.id, &conn);
        }

        let records = list_audit_records(
            Page {
                offset: 1,
                limit: 2,
            },
            &conn,
        )
        .unwrap();

        let amounts: Vec<_> = records.iter().map(|record| record.new_amount).collect();
        assert_eq!(amounts, vec![Some(3.0), Some(2.0)]);
    }

    #[test]
    fn operation_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&AuditOperation::Delete).unwrap(),
            "\"DELETE\""
        );
    }
}
