//! This modules defines the common functionality for paging data.

use serde::Deserialize;

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of items to return when the request does not specify a limit.
    pub default_limit: u64,
    /// The largest limit a request may ask for. Larger limits are clamped to this value.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
        }
    }
}

/// The query parameters for requesting a page of items, e.g. `?offset=20&limit=10`.
///
/// `skip` is accepted as an alias for `offset`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// The number of items to skip.
    #[serde(default, alias = "skip")]
    pub offset: Option<u64>,
    /// The maximum number of items to return.
    #[serde(default)]
    pub limit: Option<u64>,
}

/// A resolved page request that can be bound to `LIMIT` and `OFFSET` in SQL queries.
///
/// SQLite takes these as signed integers and treats a negative `LIMIT` as no limit, so only
/// [PageQuery::resolve] should build one from request values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The number of rows to skip.
    pub offset: i64,
    /// The maximum number of rows to return.
    pub limit: i64,
}

impl PageQuery {
    /// Fill in missing values from `config` and clamp the limit to the configured maximum.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] if the offset or limit does not fit in an SQL integer.
    pub fn resolve(self, config: &PaginationConfig) -> Result<Page, Error> {
        let offset = self.offset.unwrap_or(0);
        let limit = self
            .limit
            .unwrap_or(config.default_limit)
            .min(config.max_limit);

        Ok(Page {
            offset: to_sql_integer("offset", offset)?,
            limit: to_sql_integer("limit", limit)?,
        })
    }
}

fn to_sql_integer(name: &str, value: u64) -> Result<i64, Error> {
    i64::try_from(value)
        .map_err(|_| Error::InvalidRequest(format!("{name} must be at most {}", i64::MAX)))
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: 0,
            limit: 100,
        }
    }
}
