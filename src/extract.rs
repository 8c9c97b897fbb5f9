//! Request extractors that report malformed input as an [Error] with a JSON body.
//!
//! axum's own extractors reply with plain text and, for JSON bodies that do not match the
//! expected shape, a 422 status. These wrappers convert the rejection into
//! [Error::InvalidRequest] so that every client error looks the same.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// A JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// The query string of a request.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

/// The path parameters of a request, e.g. the ID in `/categories/{category_id}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);
