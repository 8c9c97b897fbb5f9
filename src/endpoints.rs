//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The root route which describes the service.
pub const ROOT: &str = "/";
/// The route for health checks.
pub const HEALTH: &str = "/health";
/// The route to create and list categories.
pub const CATEGORIES: &str = "/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// Alias of [TRANSACTIONS].
pub const EXPENSES: &str = "/expenses";
/// Alias of [TRANSACTION].
pub const EXPENSE: &str = "/expenses/{transaction_id}";
/// The route for the totals over all transactions.
pub const STATISTICS_SUMMARY: &str = "/statistics/summary";
/// The route for the totals per category.
pub const STATISTICS_BY_CATEGORY: &str = "/statistics/by-category";
/// The route for the totals per month.
pub const STATISTICS_MONTHLY: &str = "/statistics/monthly";
/// The route for the budget.
pub const BUDGET: &str = "/statistics/budget";
/// The route for the audit log.
pub const AUDIT_LOGS: &str = "/audit-logs";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
