mod person;
pub mod schema;
mod user;

use std::sync::Arc;

use roster_core::ServiceError;
use roster_sql::{SQLError, SQLStore, TxContext, Value};

/// The record store service. Holds the SQL backend and initializes the
/// schema at construction.
pub struct RegistryService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl RegistryService {
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    /// Total row count for a table.
    pub(crate) fn count_rows(&self, table: &str) -> Result<usize, ServiceError> {
        let sql = format!("SELECT COUNT(*) AS cnt FROM {}", table);
        let rows = self
            .sql
            .query(&sql, &[])
            .map_err(|e| storage_err("count rows", e))?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) as usize)
    }
}

/// Existence pre-check inside a transaction. Table names are
/// compile-time constants, never caller input.
pub(crate) fn row_exists(tx: &dyn TxContext, table: &str, id: i64) -> Result<bool, SQLError> {
    let sql = format!("SELECT COUNT(*) AS cnt FROM {} WHERE id = ?1", table);
    let rows = tx.query(&sql, &[Value::Integer(id)])?;
    Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0) > 0)
}

/// Map a backing-store failure to `Storage`, logging it with context.
/// Storage faults are the one error kind treated as systemic; not-found
/// and validation rejections are ordinary control flow and stay silent.
pub(crate) fn storage_err(op: &str, e: SQLError) -> ServiceError {
    tracing::error!("storage failure during {}: {}", op, e);
    ServiceError::Storage(e.to_string())
}
