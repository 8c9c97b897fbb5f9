//! Summary statistics over transactions.

mod endpoints;
mod queries;

pub use endpoints::{
    get_category_statistics_endpoint, get_monthly_summary_endpoint, get_summary_endpoint,
};
pub use queries::{
    CategoryStatistics, MonthlySummary, Summary, get_category_statistics, get_monthly_summary,
    get_summary,
};
