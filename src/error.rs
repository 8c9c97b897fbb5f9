//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::database_id::{CategoryId, TransactionId};

/// The maximum number of characters allowed in a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// The maximum number of characters allowed in a description.
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The category name is longer than [MAX_CATEGORY_NAME_LENGTH] characters.
    #[error("Category name cannot be longer than {MAX_CATEGORY_NAME_LENGTH} characters")]
    CategoryNameTooLong,

    /// A description was given but it only contained whitespace.
    ///
    /// Clients that do not want a description should omit the field or set it
    /// to null instead.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The description is longer than [MAX_DESCRIPTION_LENGTH] characters.
    #[error("Description cannot be longer than {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,

    /// The amount of a transaction was zero, negative or not a finite number.
    #[error("Amount must be greater than 0, got {0}")]
    InvalidAmount(f64),

    /// The specified category name already exists in the database.
    #[error("Category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The request could not be parsed, e.g. malformed JSON or a non-integer ID.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The category ID did not refer to a category in the database.
    ///
    /// This is returned both when a category is requested directly and when
    /// a transaction refers to a category that does not exist.
    #[error("Category not found")]
    CategoryNotFound(CategoryId),

    /// The transaction ID did not refer to a transaction in the database.
    #[error("Transaction not found")]
    TransactionNotFound(TransactionId),

    /// Tried to delete a category that still has transactions.
    #[error("Category {0} still has transactions and cannot be deleted")]
    CategoryInUse(CategoryId),

    /// An unhandled/unexpected SQL error.
    ///
    /// The unit of work that raised it has already been rolled back.
    #[error("Database error: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code that the client should receive for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::CategoryNotFound(_) | Error::TransactionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Error::CategoryInUse(_) => StatusCode::CONFLICT,
            Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
            Error::EmptyCategoryName
            | Error::CategoryNameTooLong
            | Error::EmptyDescription
            | Error::DescriptionTooLong
            | Error::InvalidAmount(_)
            | Error::DuplicateCategoryName(_)
            | Error::InvalidRequest(_)
            | Error::SqlError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rejecting request with {status}: {self}");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
