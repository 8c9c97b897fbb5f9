//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    audit::{record_transaction_delete, record_transaction_insert, record_transaction_update},
    budget::add_to_budget,
    category::{Category, CategoryName, get_category},
    database_id::{CategoryId, TransactionId},
    description::Description,
    pagination::Page,
    patch::Patch,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent on something in a category.
///
/// To create a new `Transaction`, use [NewTransaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent, always greater than zero.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: Option<Description>,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction that has not been stored yet.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let transaction = NewTransaction::build(45.99, category.id)
///     .date(datetime!(2025-01-15 09:30 UTC))
///     .description(Description::new("Coffee shop purchase")?);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The amount of money spent. Must be greater than zero.
    pub amount: f64,

    /// When the transaction happened.
    ///
    /// Defaults to the time the transaction is stored if not specified.
    pub date: Option<OffsetDateTime>,

    /// An optional human-readable description of the transaction.
    pub description: Option<Description>,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    ///
    /// The category must exist when the transaction is stored.
    pub category_id: CategoryId,
}

impl NewTransaction {
    /// Start building a transaction of `amount` in the category `category_id`.
    pub fn build(amount: f64, category_id: CategoryId) -> Self {
        Self {
            amount,
            date: None,
            description: None,
            category_id,
        }
    }

    /// Set the date of the transaction.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }
}

/// Validated changes to apply to an existing transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionChanges {
    pub amount: Patch<f64>,
    pub description: Patch<Option<Description>>,
    pub date: Patch<OffsetDateTime>,
    pub category_id: Patch<CategoryId>,
}

/// Request body for creating a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[serde(default, with = "crate::timestamp::option")]
    pub date: Option<OffsetDateTime>,
}

impl TryFrom<TransactionForm> for NewTransaction {
    type Error = Error;

    fn try_from(form: TransactionForm) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: validate_amount(form.amount)?,
            date: form.date,
            description: Description::new_optional(form.description)?,
            category_id: form.category_id,
        })
    }
}

/// Request body for a partial update of a transaction.
///
/// Fields that are left out keep their current value. Setting `description` to `null` removes
/// the description.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionUpdateForm {
    #[serde(default)]
    pub amount: Patch<f64>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
    #[serde(default)]
    pub category_id: Patch<CategoryId>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize_patch")]
    pub date: Patch<OffsetDateTime>,
}

impl TryFrom<TransactionUpdateForm> for TransactionChanges {
    type Error = Error;

    fn try_from(form: TransactionUpdateForm) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: form.amount.try_map(validate_amount)?,
            description: form.description.try_map(Description::new_optional)?,
            date: form.date,
            category_id: form.category_id,
        })
    }
}

/// Check that `amount` is a finite number greater than zero.
///
/// # Errors
/// Returns an [Error::InvalidAmount] otherwise.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Selects the columns read by [map_transaction_row], the category is joined in.
const SELECT_TRANSACTION: &str = "SELECT t.id, t.amount, t.date, t.description, t.category_id,
        t.created_at, c.id, c.name, c.description, c.created_at
    FROM \"transaction\" t INNER JOIN category c ON c.id = t.category_id";

/// Store a new transaction.
///
/// Besides inserting the transaction row this writes an `INSERT` audit record and adds the
/// amount to the budget. Call it inside [crate::db::unit_of_work] so that the three writes are
/// committed or rolled back together.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is not greater than zero,
/// - [Error::CategoryNotFound] if the category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let amount = validate_amount(new_transaction.amount)?;
    get_category(new_transaction.category_id, connection)?;

    let created_at = OffsetDateTime::now_utc();
    let date = new_transaction
        .date
        .unwrap_or(created_at)
        .to_offset(UtcOffset::UTC);

    let id: TransactionId = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
        )?
        .query_row(
            (
                amount,
                date,
                new_transaction
                    .description
                    .as_ref()
                    .map(AsRef::<str>::as_ref),
                new_transaction.category_id,
                created_at,
            ),
            |row| row.get(0),
        )?;
    let transaction = get_transaction(id, connection)?;

    record_transaction_insert(&transaction, connection)?;
    add_to_budget(transaction.amount, connection)?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE t.id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound(id),
            error => error.into(),
        })
}

/// Retrieve a page of transactions in the order they were created.
pub fn list_transactions(page: Page, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} ORDER BY t.id ASC LIMIT ?1 OFFSET ?2"
        ))?
        .query_map((page.limit, page.offset), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Apply `changes` to the transaction `id` and return the updated transaction.
///
/// Fields that are absent in `changes` keep their stored value. An `UPDATE` audit record with the
/// values before and after the change is written alongside the update.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if the transaction does not exist,
/// - [Error::InvalidAmount] if the new amount is not greater than zero,
/// - [Error::CategoryNotFound] if the new category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    changes: TransactionChanges,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let current = get_transaction(id, connection)?;

    let amount = changes.amount.try_map(validate_amount)?;

    if let Patch::Present(category_id) = changes.category_id {
        get_category(category_id, connection)?;
    }

    let amount = amount.unwrap_or(current.amount);
    let description = changes.description.unwrap_or(current.description.clone());
    let date = changes
        .date
        .unwrap_or(current.date)
        .to_offset(UtcOffset::UTC);
    let category_id = changes.category_id.unwrap_or(current.category_id);

    connection.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, date = ?2, description = ?3, category_id = ?4
         WHERE id = ?5",
        (
            amount,
            date,
            description.as_ref().map(AsRef::<str>::as_ref),
            category_id,
            id,
        ),
    )?;
    let updated = get_transaction(id, connection)?;

    record_transaction_update(&current, &updated, connection)?;

    Ok(updated)
}

/// Delete the transaction `id` and write a `DELETE` audit record with its last values.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if the transaction does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let current = get_transaction(id, connection)?;

    connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

    record_transaction_delete(&current, connection)?;

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // AUTOINCREMENT stops the IDs of deleted transactions from being reused, so audit records
    // always refer to a single transaction.
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL CHECK (amount > 0),
            date TEXT NOT NULL,
            description TEXT CHECK (description IS NULL OR length(description) > 0),
            category_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_category_id ON \"transaction\"(category_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let category_id = row.get(4)?;
    let created_at = row.get(5)?;
    let category_name: String = row.get(7)?;
    let category_description: Option<String> = row.get(8)?;

    Ok(Transaction {
        id,
        amount,
        date,
        description: description.map(Description::new_unchecked),
        category_id,
        category: Category {
            id: row.get(6)?,
            name: CategoryName::new_unchecked(&category_name),
            description: category_description.map(Description::new_unchecked),
            created_at: row.get(9)?,
        },
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        category::get_category,
        description::Description,
        pagination::Page,
        patch::Patch,
        test_utils::{create_test_category, create_test_transaction, get_test_connection},
        transaction::{
            NewTransaction, TransactionChanges, count_transactions, create_transaction,
            delete_transaction, get_transaction, list_transactions, update_transaction,
        },
    };

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let date = datetime!(2025-10-05 12:00 UTC);

        let result = create_transaction(
            NewTransaction::build(12.3, category.id)
                .date(date)
                .description(Description::new("Lunch").unwrap()),
            &conn,
        );

        let transaction = result.expect("Could not create transaction");
        assert!(transaction.id > 0);
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.date, date);
        assert_eq!(transaction.description.unwrap().as_ref(), "Lunch");
        assert_eq!(transaction.category_id, category.id);
        assert_eq!(transaction.category, category);
    }

    #[test]
    fn create_defaults_date_to_now() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let before = OffsetDateTime::now_utc();

        let transaction = create_transaction(NewTransaction::build(1.0, category.id), &conn)
            .expect("Could not create transaction");

        let after = OffsetDateTime::now_utc();
        assert!(transaction.date >= before && transaction.date <= after);
        assert_eq!(transaction.date, transaction.created_at);
    }

    #[test]
    fn create_stores_dates_in_utc() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let date = datetime!(2025-10-05 12:00 +13:00);

        let transaction = create_transaction(
            NewTransaction::build(1.0, category.id).date(date),
            &conn,
        )
        .expect("Could not create transaction");

        assert_eq!(transaction.date, date);
        assert_eq!(transaction.date.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let conn = get_test_connection();

        let result = create_transaction(NewTransaction::build(123.45, 42), &conn);

        assert_eq!(result, Err(Error::CategoryNotFound(42)));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn create_fails_on_non_positive_amount() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);

        let result = create_transaction(NewTransaction::build(-5.0, category.id), &conn);

        assert_eq!(result, Err(Error::InvalidAmount(-5.0)));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn get_transaction_with_invalid_id_returns_not_found() {
        let conn = get_test_connection();

        let result = get_transaction(7, &conn);

        assert_eq!(result, Err(Error::TransactionNotFound(7)));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let want_count = 20;
        for i in 1..=want_count {
            create_test_transaction(i as f64, category.id, &conn);
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn list_returns_page_in_insertion_order() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let inserted: Vec<_> = (1..=5)
            .map(|i| create_test_transaction(i as f64, category.id, &conn))
            .collect();

        let got = list_transactions(
            Page {
                offset: 1,
                limit: 3,
            },
            &conn,
        )
        .expect("Could not list transactions");

        assert_eq!(got, inserted[1..4].to_vec());
    }

    #[test]
    fn update_amount_leaves_other_fields_unchanged() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let original = create_transaction(
            NewTransaction::build(10.0, category.id)
                .date(datetime!(2024-02-29 08:15 UTC))
                .description(Description::new("Groceries").unwrap()),
            &conn,
        )
        .unwrap();

        let updated = update_transaction(
            original.id,
            TransactionChanges {
                amount: Patch::Present(99.0),
                ..Default::default()
            },
            &conn,
        )
        .expect("Could not update transaction");

        let refetched = get_transaction(original.id, &conn).unwrap();
        assert_eq!(refetched, updated);
        assert_eq!(refetched.amount, 99.0);
        assert_eq!(refetched.description, original.description);
        assert_eq!(refetched.date, original.date);
        assert_eq!(refetched.category_id, original.category_id);
        assert_eq!(refetched.created_at, original.created_at);
    }

    #[test]
    fn update_can_move_transaction_to_other_category() {
        let conn = get_test_connection();
        let food = create_test_category("Food", &conn);
        let rent = create_test_category("Rent", &conn);
        let original = create_test_transaction(10.0, food.id, &conn);

        let updated = update_transaction(
            original.id,
            TransactionChanges {
                category_id: Patch::Present(rent.id),
                date: Patch::Present(original.date + Duration::days(1)),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.category_id, rent.id);
        assert_eq!(updated.category, rent);
        assert_eq!(updated.date, original.date + Duration::days(1));
        assert_eq!(updated.amount, original.amount);
    }

    #[test]
    fn update_can_clear_description() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let original = create_transaction(
            NewTransaction::build(10.0, category.id)
                .description(Description::new("Groceries").unwrap()),
            &conn,
        )
        .unwrap();

        let updated = update_transaction(
            original.id,
            TransactionChanges {
                description: Patch::Present(None),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(updated.description, None);
    }

    #[test]
    fn update_with_missing_category_fails() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let original = create_test_transaction(10.0, category.id, &conn);

        let result = update_transaction(
            original.id,
            TransactionChanges {
                category_id: Patch::Present(category.id + 100),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::CategoryNotFound(category.id + 100)));
        assert_eq!(get_transaction(original.id, &conn), Ok(original));
    }

    #[test]
    fn update_missing_transaction_returns_not_found() {
        let conn = get_test_connection();

        let result = update_transaction(404, TransactionChanges::default(), &conn);

        assert_eq!(result, Err(Error::TransactionNotFound(404)));
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let category = create_test_category("Food", &conn);
        let transaction = create_test_transaction(1.23, category.id, &conn);

        delete_transaction(transaction.id, &conn).expect("Could not delete transaction");

        assert_eq!(
            get_transaction(transaction.id, &conn),
            Err(Error::TransactionNotFound(transaction.id))
        );
        assert!(get_category(category.id, &conn).is_ok());
    }

    #[test]
    fn delete_missing_transaction_returns_not_found() {
        let conn = get_test_connection();

        let result = delete_transaction(1, &conn);

        assert_eq!(result, Err(Error::TransactionNotFound(1)));
    }
}
