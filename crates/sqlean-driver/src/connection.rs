//! sqlean connection implementation

use crate::extensions::{load_extensions, ExtensionSet};
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params_from_iter, Connection as RusqliteConnection, InterruptHandle, OpenFlags};
use sqlean_core::{
    ColumnMeta, Connection, QueryCancelHandle, QueryResult, Result, Row, SqleanError,
    StatementResult, Transaction, Value,
};
use std::path::Path;
use std::sync::Arc;

/// Cancel handle for running queries.
///
/// Wraps the engine interrupt handle and can be called from any thread;
/// the interrupted statement returns an interrupt error.
pub struct SqleanCancelHandle {
    interrupt_handle: Arc<InterruptHandle>,
}

impl QueryCancelHandle for SqleanCancelHandle {
    fn cancel(&self) {
        tracing::debug!("interrupting running statement");
        self.interrupt_handle.interrupt();
    }
}

/// Connection to a sqlean database
pub struct SqleanConnection {
    conn: Arc<Mutex<RusqliteConnection>>,
    interrupt_handle: Arc<InterruptHandle>,
    extensions: ExtensionSet,
}

impl SqleanConnection {
    /// Open a database with no extensions loaded
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with_extensions(path, ExtensionSet::None, Path::new(""))
    }

    /// Open a database and load the requested extension groups.
    ///
    /// The groups are loaded right after the database opens, before the
    /// connection is handed out, so every statement on the connection
    /// sees the same SQL surface. The set cannot change afterwards.
    pub fn open_with_extensions(
        path: &str,
        extensions: ExtensionSet,
        extension_dir: &Path,
    ) -> Result<Self> {
        tracing::info!(path = %path, "opening sqlean database");
        let expanded_path = Self::expand_path(path)?;

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                SqleanError::Connection(format!("Failed to open in-memory database: {}", e))
            })?
        } else {
            if !expanded_path.starts_with("file:") {
                let file_path = Path::new(&expanded_path);
                if let Some(parent) = file_path.parent()
                    && !parent.as_os_str().is_empty()
                    && !parent.exists()
                {
                    return Err(SqleanError::Connection(format!(
                        "Parent directory does not exist: {}",
                        parent.display()
                    )));
                }
            }

            RusqliteConnection::open_with_flags(&expanded_path, flags).map_err(|e| {
                SqleanError::Connection(format!(
                    "Failed to open database at '{}': {}",
                    expanded_path, e
                ))
            })?
        };

        // Extensions load before any pragma or statement runs, so even
        // connection setup could use them if it had to.
        load_extensions(&conn, &extensions, extension_dir)?;

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| SqleanError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| SqleanError::Connection(format!("Failed to set journal mode: {}", e)))?;

        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| SqleanError::Connection(format!("Failed to set synchronous mode: {}", e)))?;

        let interrupt_handle = Arc::new(conn.get_interrupt_handle());

        tracing::info!(
            path = %expanded_path,
            extensions = extensions.to_option().as_deref().unwrap_or("none"),
            "sqlean connection established"
        );
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            interrupt_handle,
            extensions,
        })
    }

    /// The extension set this connection was opened with
    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// Expand path to handle ~ (home directory) and relative paths
    fn expand_path(path: &str) -> Result<String> {
        if path == ":memory:" || path.starts_with("file:") {
            return Ok(path.to_string());
        }

        let expanded = if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                let home_path = std::path::PathBuf::from(home);
                home_path.join(rest).to_string_lossy().to_string()
            } else {
                return Err(SqleanError::Configuration(
                    "Unable to determine HOME directory".into(),
                ));
            }
        } else if path.starts_with('~') {
            return Err(SqleanError::Configuration(
                "User-specific home directories (~user) are not supported".into(),
            ));
        } else {
            path.to_string()
        };

        let path_buf = std::path::PathBuf::from(&expanded);
        let result = if path_buf.is_relative() {
            std::env::current_dir()
                .map_err(SqleanError::Io)?
                .join(path_buf)
                .to_string_lossy()
                .to_string()
        } else {
            expanded
        };

        Ok(result)
    }

    /// Execute multiple SQL statements in a batch (no parameters)
    pub async fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!("executing SQL batch");
        let conn = self.conn.lock();
        conn.execute_batch(sql)
            .map_err(|e| SqleanError::Query(format!("Failed to execute batch: {}", e)))
    }
}

#[async_trait]
impl Connection for SqleanConnection {
    fn driver_name(&self) -> &str {
        "sqlean"
    }

    fn dialect_id(&self) -> Option<&'static str> {
        Some("sqlean")
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        let conn = self.conn.lock();
        let rusqlite_params = values_to_rusqlite(params);

        let rows_affected = conn
            .execute(sql, params_from_iter(rusqlite_params.iter()))
            .map_err(|e| SqleanError::Query(format!("Failed to execute statement: {}", e)))?;

        tracing::debug!(affected_rows = rows_affected, "statement executed");
        Ok(StatementResult {
            affected_rows: rows_affected as u64,
        })
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let conn = self.conn.lock();
        run_query(&conn, sql, params)
    }

    async fn begin_transaction(&self) -> Result<Box<dyn Transaction>> {
        tracing::debug!("beginning transaction");
        {
            let conn = self.conn.lock();
            // DEFERRED means the write lock is only acquired when the first
            // write occurs, matching the default transaction behaviour.
            conn.execute_batch("BEGIN DEFERRED")
                .map_err(|e| SqleanError::Query(format!("Failed to begin transaction: {}", e)))?;
        }
        Ok(Box::new(SqleanTransaction {
            conn: Arc::clone(&self.conn),
            committed: false,
            rolled_back: false,
        }))
    }

    async fn close(&self) -> Result<()> {
        tracing::info!("closing sqlean connection");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn cancel_handle(&self) -> Option<Arc<dyn QueryCancelHandle>> {
        Some(Arc::new(SqleanCancelHandle {
            interrupt_handle: self.interrupt_handle.clone(),
        }))
    }
}

/// Transaction wrapper.
///
/// Issues raw `BEGIN DEFERRED` / `COMMIT` / `ROLLBACK` SQL so that it can
/// share the connection mutex without running into rusqlite's borrow-based
/// transaction lifetime requirements.
pub struct SqleanTransaction {
    conn: Arc<Mutex<RusqliteConnection>>,
    committed: bool,
    rolled_back: bool,
}

impl Drop for SqleanTransaction {
    fn drop(&mut self) {
        // A transaction abandoned without commit/rollback gets a
        // best-effort rollback so the connection is left clean.
        if !self.committed && !self.rolled_back {
            tracing::warn!("transaction dropped without commit or rollback, rolling back");
            let conn = self.conn.lock();
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                tracing::error!(error = %e, "automatic rollback on drop failed");
            }
        }
    }
}

#[async_trait]
impl Transaction for SqleanTransaction {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        tracing::debug!("committing transaction");

        if self.rolled_back {
            return Err(SqleanError::Query("Transaction already rolled back".into()));
        }
        if self.committed {
            return Err(SqleanError::Query("Transaction already committed".into()));
        }

        {
            let conn = self.conn.lock();
            conn.execute_batch("COMMIT")
                .map_err(|e| SqleanError::Query(format!("Failed to commit transaction: {}", e)))?;
        }

        self.committed = true;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        tracing::debug!("rolling back transaction");

        if self.committed {
            return Err(SqleanError::Query("Transaction already committed".into()));
        }
        if self.rolled_back {
            return Ok(());
        }

        {
            let conn = self.conn.lock();
            conn.execute_batch("ROLLBACK")
                .map_err(|e| SqleanError::Query(format!("Failed to rollback transaction: {}", e)))?;
        }

        self.rolled_back = true;
        Ok(())
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        tracing::debug!(sql_preview = %sql.chars().take(100).collect::<String>(), "query in transaction");
        let conn = self.conn.lock();
        run_query(&conn, sql, params)
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        tracing::debug!(sql_preview = %sql.chars().take(100).collect::<String>(), "statement in transaction");
        let conn = self.conn.lock();
        let rusqlite_params = values_to_rusqlite(params);

        let rows_affected = conn
            .execute(sql, params_from_iter(rusqlite_params.iter()))
            .map_err(|e| SqleanError::Query(format!("Failed to execute statement: {}", e)))?;

        Ok(StatementResult {
            affected_rows: rows_affected as u64,
        })
    }
}

/// Prepare and run a query, collecting all rows
fn run_query(conn: &RusqliteConnection, sql: &str, params: &[Value]) -> Result<QueryResult> {
    let start_time = std::time::Instant::now();
    let rusqlite_params = values_to_rusqlite(params);

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| SqleanError::Query(format!("Failed to prepare query: {}", e)))?;

    let column_count = stmt.column_count();
    let mut column_names: Vec<String> = Vec::with_capacity(column_count);
    let mut columns: Vec<ColumnMeta> = Vec::with_capacity(column_count);

    // Declared types come from the table schema where available, so typed
    // columns (INET, CIDR, UUID) keep their DDL name in the metadata.
    let stmt_columns = stmt.columns();
    for (idx, col) in stmt_columns.iter().enumerate() {
        let name = col.name().to_string();
        let data_type = col.decl_type().unwrap_or("DYNAMIC").to_string();

        column_names.push(name.clone());
        columns.push(ColumnMeta {
            name,
            data_type,
            nullable: true,
            ordinal: idx,
        });
    }

    let mut rows = Vec::new();
    let mut query_rows = stmt
        .query(params_from_iter(rusqlite_params.iter()))
        .map_err(|e| SqleanError::Query(format!("Failed to execute query: {}", e)))?;

    while let Some(row) = query_rows
        .next()
        .map_err(|e| SqleanError::Query(format!("Failed to fetch row: {}", e)))?
    {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(rusqlite_to_value(row, i)?);
        }
        rows.push(Row::new(column_names.clone(), values));
    }

    let execution_time_ms = start_time.elapsed().as_millis() as u64;

    tracing::debug!(
        row_count = rows.len(),
        execution_time_ms = execution_time_ms,
        "query executed"
    );
    Ok(QueryResult {
        id: uuid::Uuid::new_v4(),
        columns,
        rows,
        execution_time_ms,
    })
}

/// Convert our Value types to rusqlite-compatible types.
///
/// Structured values (UUID, INET, CIDR) bind as their canonical text form,
/// the storage representation the adapters read back.
fn values_to_rusqlite(values: &[Value]) -> Vec<rusqlite::types::Value> {
    values.iter().map(value_to_rusqlite).collect()
}

fn value_to_rusqlite(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Bool(b) => rusqlite::types::Value::Integer(if *b { 1 } else { 0 }),
        Value::Int32(i) => rusqlite::types::Value::Integer(*i as i64),
        Value::Int64(i) => rusqlite::types::Value::Integer(*i),
        Value::Float64(f) => rusqlite::types::Value::Real(*f),
        Value::String(s) => rusqlite::types::Value::Text(s.clone()),
        Value::Bytes(b) => rusqlite::types::Value::Blob(b.clone()),
        Value::Uuid(u) => rusqlite::types::Value::Text(u.to_string()),
        Value::Inet(net) => rusqlite::types::Value::Text(net.to_string()),
        Value::Cidr(net) => rusqlite::types::Value::Text(net.trunc().to_string()),
        Value::Date(d) => rusqlite::types::Value::Text(d.to_string()),
        Value::Time(t) => rusqlite::types::Value::Text(t.to_string()),
        Value::DateTime(dt) => rusqlite::types::Value::Text(dt.to_string()),
        Value::DateTimeUtc(dt) => rusqlite::types::Value::Text(dt.to_rfc3339()),
        Value::Json(j) => rusqlite::types::Value::Text(j.to_string()),
    }
}

/// Convert a rusqlite row value to our Value type.
///
/// Blobs stay blobs; the uuid extension's `uuid_blob()` output is raw
/// bytes and must not be sniffed into text.
fn rusqlite_to_value(row: &rusqlite::Row, idx: usize) -> Result<Value> {
    use rusqlite::types::ValueRef;

    let value_ref = row
        .get_ref(idx)
        .map_err(|e| SqleanError::Query(e.to_string()))?;

    let value = match value_ref {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int64(i),
        ValueRef::Real(f) => Value::Float64(f),
        ValueRef::Text(s) => Value::String(String::from_utf8_lossy(s).to_string()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    };

    Ok(value)
}
