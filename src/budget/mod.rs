//! The lifetime spending budget.

mod core;
mod get_endpoint;

pub use self::core::{Budget, add_to_budget, create_budget_table, get_budget};
pub use get_endpoint::get_budget_endpoint;
