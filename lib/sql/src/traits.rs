use crate::error::SQLError;

/// A dynamically-typed SQL parameter value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// A row returned from a SQL query — column name to value.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a text column value by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get an integer column value by name.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }
}

/// Outcome of a transactional closure.
///
/// `Commit` applies the transaction's writes; `Rollback` discards them
/// without being an error — the caller inspects the returned outcome to
/// translate a deliberate rollback (e.g. "row does not exist") into its
/// own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    Commit,
    Rollback,
}

/// Execution surface available inside a transaction.
pub trait TxContext {
    /// Execute a query against the transaction and return rows.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement against the transaction, returning the
    /// affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;

    /// Rowid of the most recent successful INSERT on this transaction.
    fn last_insert_id(&self) -> i64;
}

/// SQLStore provides a SQL execution interface backed by an embedded database.
pub trait SQLStore: Send + Sync {
    /// Execute a query and return rows.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement (INSERT/UPDATE/DELETE) and return affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;

    /// Run `f` inside a transaction.
    ///
    /// The transaction commits only when `f` returns `Ok(TxOutcome::Commit)`.
    /// `Ok(TxOutcome::Rollback)` and every `Err` exit roll back; no write
    /// made inside `f` is visible after a non-commit exit.
    fn with_tx(
        &self,
        f: &mut dyn FnMut(&dyn TxContext) -> Result<TxOutcome, SQLError>,
    ) -> Result<TxOutcome, SQLError>;
}
