//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryChanges, CategoryName, NewCategory},
    database_id::CategoryId,
    description::Description,
    pagination::Page,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategoryName] if a category with the same name already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection
        .prepare(
            "INSERT INTO category (name, description, created_at) VALUES (?1, ?2, ?3)
             RETURNING id, name, description, created_at;",
        )?
        .query_row(
            (
                category.name.as_ref(),
                category.description.as_ref().map(AsRef::<str>::as_ref),
                created_at,
            ),
            map_row,
        )
        .map_err(|error| map_unique_name_error(error, &category.name))
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns an [Error::CategoryNotFound] if `category_id` does not refer to a category.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, description, created_at FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound(category_id),
            error => error.into(),
        })
}

/// Retrieve a page of categories in insertion order.
pub fn list_categories(page: Page, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at FROM category
             ORDER BY id ASC LIMIT ?1 OFFSET ?2;",
        )?
        .query_map((page.limit, page.offset), map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Apply `changes` to the category `category_id` and return the updated category.
///
/// Fields that are absent in `changes` keep their stored value.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if the category does not exist,
/// - [Error::DuplicateCategoryName] if the new name is used by another category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_category(
    category_id: CategoryId,
    changes: CategoryChanges,
    connection: &Connection,
) -> Result<Category, Error> {
    let current = get_category(category_id, connection)?;

    let name = changes.name.unwrap_or(current.name);
    let description = changes.description.unwrap_or(current.description);

    connection
        .prepare(
            "UPDATE category SET name = ?1, description = ?2 WHERE id = ?3
             RETURNING id, name, description, created_at;",
        )?
        .query_row(
            (
                name.as_ref(),
                description.as_ref().map(AsRef::<str>::as_ref),
                category_id,
            ),
            map_row,
        )
        .map_err(|error| map_unique_name_error(error, &name))
}

/// Delete a category by ID.
///
/// Categories that are still referenced by transactions are not deleted.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if the category does not exist,
/// - [Error::CategoryInUse] if transactions still refer to the category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    get_category(category_id, connection)?;

    let transaction_count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1;",
        [category_id],
        |row| row.get(0),
    )?;

    if transaction_count > 0 {
        return Err(Error::CategoryInUse(category_id));
    }

    connection.execute("DELETE FROM category WHERE id = ?1;", [category_id])?;

    Ok(())
}

/// Get the total number of categories in the database.
pub fn count_categories(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM category;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE CHECK (length(name) > 0),
            description TEXT,
            created_at TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_unique_name_error(error: rusqlite::Error, name: &CategoryName) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            _,
        ) => Error::DuplicateCategoryName(name.to_string()),
        error => error.into(),
    }
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let raw_description: Option<String> = row.get(2)?;
    let created_at = row.get(3)?;

    Ok(Category {
        id,
        name: CategoryName::new_unchecked(&raw_name),
        description: raw_description.map(Description::new_unchecked),
        created_at,
    })
}
