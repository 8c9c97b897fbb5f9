//! Application router configuration.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::{
    AppState,
    audit::list_audit_log_endpoint,
    budget::get_budget_endpoint,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    statistics::{
        get_category_statistics_endpoint, get_monthly_summary_endpoint, get_summary_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let transaction_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::EXPENSES,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        );

    Router::new()
        .route(endpoints::ROOT, get(get_service_info))
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .merge(transaction_routes)
        .route(endpoints::STATISTICS_SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::STATISTICS_BY_CATEGORY,
            get(get_category_statistics_endpoint),
        )
        .route(
            endpoints::STATISTICS_MONTHLY,
            get(get_monthly_summary_endpoint),
        )
        .route(endpoints::BUDGET, get(get_budget_endpoint))
        .route(endpoints::AUDIT_LOGS, get(list_audit_log_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' describes the service.
async fn get_service_info() -> Json<Value> {
    Json(json!({
        "message": "Expense Tracker API",
        "status": "running",
    }))
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
