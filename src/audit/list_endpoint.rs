use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    audit::{AuditRecord, list_audit_records},
    db::lock_connection,
    extract::ApiQuery,
    pagination::{PageQuery, PaginationConfig},
};

/// The state needed to read the audit log.
#[derive(Debug, Clone)]
pub struct AuditLogState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for AuditLogState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A route handler for listing audit records, newest first.
pub async fn list_audit_log_endpoint(
    State(state): State<AuditLogState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Vec<AuditRecord>>, Error> {
    let page = query.resolve(&state.pagination_config)?;
    let connection = lock_connection(&state.db_connection)?;

    list_audit_records(page, &connection).map(Json)
}
