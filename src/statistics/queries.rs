//! Aggregate queries over the stored transactions.
//!
//! Every figure is computed when it is requested, nothing is cached. Sums and averages over no
//! rows are reported as zero rather than null.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{Error, database_id::CategoryId};

/// The maximum number of months returned by [get_monthly_summary].
pub const MONTHLY_SUMMARY_LIMIT: u32 = 12;

/// Totals over all transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Summary {
    pub total_amount: f64,
    pub transaction_count: u32,
    pub average_amount: f64,
}

/// Totals over the transactions in a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct CategoryStatistics {
    pub category_id: CategoryId,
    /// The category name.
    pub category: String,
    pub transaction_count: u32,
    pub total_amount: f64,
    pub average_amount: f64,
}

/// Totals over the transactions in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct MonthlySummary {
    /// The month formatted as `YYYY-MM`.
    pub month: String,
    pub total_expenses: f64,
    pub transaction_count: u32,
}

/// Get the total, count and average amount over all transactions.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0), COUNT(id), COALESCE(AVG(amount), 0)
             FROM \"transaction\"",
            [],
            |row| {
                Ok(Summary {
                    total_amount: row.get(0)?,
                    transaction_count: row.get(1)?,
                    average_amount: row.get(2)?,
                })
            },
        )
        .map_err(|error| error.into())
}

/// Get the count, total and average amount for each category that has at least one transaction,
/// ordered by category ID.
pub fn get_category_statistics(connection: &Connection) -> Result<Vec<CategoryStatistics>, Error> {
    connection
        .prepare(
            "SELECT category.id, category.name,
                COUNT(\"transaction\".id), SUM(\"transaction\".amount), AVG(\"transaction\".amount)
             FROM category
             INNER JOIN \"transaction\" ON \"transaction\".category_id = category.id
             GROUP BY category.id, category.name
             ORDER BY category.id ASC",
        )?
        .query_map([], map_category_statistics_row)?
        .map(|maybe_statistics| maybe_statistics.map_err(|error| error.into()))
        .collect()
}

/// Get the total and count of transactions for each calendar month, most recent month first.
///
/// Only the most recent [MONTHLY_SUMMARY_LIMIT] months that have transactions are returned.
pub fn get_monthly_summary(connection: &Connection) -> Result<Vec<MonthlySummary>, Error> {
    // Dates are stored in UTC as "YYYY-MM-DD ...", so the first seven characters are the month.
    connection
        .prepare(
            "SELECT substr(date, 1, 7) AS month, SUM(amount), COUNT(id)
             FROM \"transaction\"
             GROUP BY month
             ORDER BY month DESC
             LIMIT ?1",
        )?
        .query_map([MONTHLY_SUMMARY_LIMIT], |row| {
            Ok(MonthlySummary {
                month: row.get(0)?,
                total_expenses: row.get(1)?,
                transaction_count: row.get(2)?,
            })
        })?
        .map(|maybe_summary| maybe_summary.map_err(|error| error.into()))
        .collect()
}

fn map_category_statistics_row(row: &Row) -> Result<CategoryStatistics, rusqlite::Error> {
    Ok(CategoryStatistics {
        category_id: row.get(0)?,
        category: row.get(1)?,
        transaction_count: row.get(2)?,
        total_amount: row.get(3)?,
        average_amount: row.get(4)?,
    })
}
