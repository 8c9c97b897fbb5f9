//! Audit log of transaction changes.
//!
//! Records are written by the transaction database functions in the same unit of work as the
//! change they describe.

mod core;
mod list_endpoint;

pub use self::core::{
    AuditOperation, AuditRecord, create_audit_log_table, list_audit_records,
    record_transaction_delete, record_transaction_insert, record_transaction_update,
};
pub use list_endpoint::list_audit_log_endpoint;
