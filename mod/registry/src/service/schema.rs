use roster_core::ServiceError;
use roster_sql::SQLStore;

/// SQL DDL statements to initialize the registry schema.
///
/// Plain typed columns: the records are small fixed scalar rows with
/// full-field-replace update semantics. Identifiers are store-assigned
/// and never reused within a live row's lifetime.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS people (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        ip_address TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL DEFAULT '',
        password TEXT NOT NULL DEFAULT '',
        role TEXT NOT NULL DEFAULT 'user'
    )",
];

/// Create all registry tables if they don't exist.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for ddl in SCHEMA {
        sql.exec(ddl, &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
    }
    Ok(())
}
