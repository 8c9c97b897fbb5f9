//! Categories: named groupings for transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod get;

pub use create::create_category_endpoint;
pub use db::{
    count_categories, create_category, create_category_table, delete_category, get_category,
    list_categories, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryChanges, CategoryForm, CategoryName, CategoryUpdateForm, NewCategory,
};
pub use edit::update_category_endpoint;
pub use get::{get_category_endpoint, list_categories_endpoint};
