//! Route handlers for the statistics endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::lock_connection,
    statistics::{
        CategoryStatistics, MonthlySummary, Summary, get_category_statistics,
        get_monthly_summary, get_summary,
    },
};

/// The state needed to compute statistics.
#[derive(Debug, Clone)]
pub struct StatisticsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the totals over all transactions.
pub async fn get_summary_endpoint(
    State(state): State<StatisticsState>,
) -> Result<Json<Summary>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_summary(&connection).map(Json)
}

/// A route handler for the per-category totals.
pub async fn get_category_statistics_endpoint(
    State(state): State<StatisticsState>,
) -> Result<Json<Vec<CategoryStatistics>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category_statistics(&connection).map(Json)
}

/// A route handler for the per-month totals.
pub async fn get_monthly_summary_endpoint(
    State(state): State<StatisticsState>,
) -> Result<Json<Vec<MonthlySummary>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_monthly_summary(&connection).map(Json)
}
