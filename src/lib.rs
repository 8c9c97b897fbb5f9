//! Expense Tracker is a REST API for tracking personal spending.
//!
//! Transactions (also called expenses) are recorded against categories. The API serves
//! summary statistics over the recorded transactions, a running total of everything ever spent
//! and an audit log of every change made to transactions.
//!
//! All data is stored in a single SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod endpoints;

mod app_state;
mod audit;
mod budget;
mod category;
mod database_id;
mod db;
mod description;
mod error;
mod extract;
mod logging;
mod not_found;
mod pagination;
mod patch;
mod routing;
mod statistics;
mod timestamp;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use audit::{AuditOperation, AuditRecord};
pub use budget::{Budget, get_budget};
pub use category::{Category, CategoryName, NewCategory, count_categories, create_category};
pub use database_id::{AuditLogId, CategoryId, DatabaseId, TransactionId};
pub use db::{initialize as initialize_db, unit_of_work};
pub use description::Description;
pub use error::{Error, MAX_CATEGORY_NAME_LENGTH, MAX_DESCRIPTION_LENGTH};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{Page, PageQuery, PaginationConfig};
pub use patch::Patch;
pub use routing::build_router;
pub use statistics::{CategoryStatistics, MonthlySummary, Summary};
pub use transaction::{NewTransaction, Transaction, count_transactions, create_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
