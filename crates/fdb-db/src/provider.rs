//! DuckDB connection provider

use crate::error::{DbError, DbResult};
use duckdb::Connection;
use fdb_core::settings::MEMORY_DATABASE;
use std::path::Path;

/// Owns the connect/disconnect lifecycle of a database handle.
///
/// Callers hold the provider explicitly and borrow the live connection from
/// it; there is no process-wide connection.
pub trait ConnectionProvider {
    /// Open the connection. Calling this while connected is a no-op.
    fn connect(&mut self) -> DbResult<()>;

    /// Close the connection. Calling this while disconnected is a no-op.
    fn disconnect(&mut self) -> DbResult<()>;

    /// Borrow the live connection, failing with [`DbError::NotConnected`]
    /// before [`connect`](Self::connect).
    fn get_active(&self) -> DbResult<&Connection>;

    /// Whether a connection is currently open
    fn is_connected(&self) -> bool;
}

/// DuckDB connection provider for a file path or `:memory:`
pub struct DuckDbProvider {
    path: String,
    conn: Option<Connection>,
}

impl DuckDbProvider {
    /// Create a disconnected provider for `path` (handles `:memory:`)
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    /// Create a disconnected provider for an in-memory database
    pub fn in_memory() -> Self {
        Self::new(MEMORY_DATABASE)
    }

    /// Database path this provider connects to
    pub fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> DbResult<Connection> {
        if self.path == MEMORY_DATABASE {
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))
        } else {
            Connection::open(Path::new(&self.path))
                .map_err(|e| DbError::ConnectionError(format!("{e}: {}", self.path)))
        }
    }
}

impl ConnectionProvider for DuckDbProvider {
    fn connect(&mut self) -> DbResult<()> {
        if self.conn.is_none() {
            log::debug!("Connecting to database {}", self.path);
            self.conn = Some(self.open()?);
        }
        Ok(())
    }

    fn disconnect(&mut self) -> DbResult<()> {
        if let Some(conn) = self.conn.take() {
            log::debug!("Disconnecting from database {}", self.path);
            conn.close()
                .map_err(|(_, e)| DbError::ConnectionError(format!("close failed: {e}")))?;
        }
        Ok(())
    }

    fn get_active(&self) -> DbResult<&Connection> {
        self.conn.as_ref().ok_or(DbError::NotConnected)
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}

/// Check whether a table or view exists (schema-qualified names allowed)
pub fn relation_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let (schema, table) = match name.rsplit_once('.') {
        Some((schema, table)) => (schema, table),
        None => ("main", name),
    };

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
        duckdb::params![schema, table],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
