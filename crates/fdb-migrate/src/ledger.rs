//! The `_migrations` ledger table.
//!
//! One row per successfully applied unit. The runner only ever appends to
//! this table; it never updates or deletes rows.

use crate::error::{MigrateError, MigrateResult};
use chrono::{DateTime, Utc};
use duckdb::Connection;
use serde::Serialize;
use std::collections::HashSet;

/// Name of the ledger table.
pub const LEDGER_TABLE: &str = "_migrations";

/// One applied migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    /// Migration name (primary key)
    pub name: String,
    /// When the unit's transaction committed
    pub applied_at: DateTime<Utc>,
}

/// Create the ledger table if it does not exist.
pub fn ensure_initialized(conn: &Connection) -> MigrateResult<()> {
    if fdb_db::relation_exists(conn, LEDGER_TABLE)? {
        return Ok(());
    }
    log::info!("Creating migration ledger table {LEDGER_TABLE}");
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
             name       VARCHAR PRIMARY KEY,
             applied_at TIMESTAMP DEFAULT now()
         );",
    )
    .map_err(MigrateError::Ledger)
}

/// Names of all applied migrations.
pub fn applied_names(conn: &Connection) -> MigrateResult<HashSet<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM _migrations")
        .map_err(MigrateError::Ledger)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(MigrateError::Ledger)?
        .collect::<Result<HashSet<_>, _>>()
        .map_err(MigrateError::Ledger)?;
    Ok(names)
}

/// All ledger rows, ordered by name.
pub fn entries(conn: &Connection) -> MigrateResult<Vec<LedgerEntry>> {
    let mut stmt = conn
        .prepare("SELECT name, epoch_us(applied_at) FROM _migrations ORDER BY name")
        .map_err(MigrateError::Ledger)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<i64>>(1)?))
        })
        .map_err(MigrateError::Ledger)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(MigrateError::Ledger)?;

    Ok(rows
        .into_iter()
        .map(|(name, micros)| LedgerEntry {
            applied_at: micros
                .and_then(DateTime::<Utc>::from_timestamp_micros)
                .unwrap_or_default(),
            name,
        })
        .collect())
}

/// Record `name` as applied at `applied_at`.
///
/// Must run inside the same transaction as the unit's logic. A name that is
/// already recorded fails with [`MigrateError::LedgerIntegrity`].
pub fn record(conn: &Connection, name: &str, applied_at: DateTime<Utc>) -> MigrateResult<()> {
    let timestamp = applied_at
        .naive_utc()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string();

    conn.execute(
        "INSERT INTO _migrations (name, applied_at) VALUES (?, CAST(? AS TIMESTAMP))",
        duckdb::params![name, timestamp],
    )
    .map_err(|e| {
        if is_duplicate_key(&e) {
            MigrateError::LedgerIntegrity {
                name: name.to_string(),
            }
        } else {
            MigrateError::Ledger(e)
        }
    })?;
    Ok(())
}

/// duckdb::Error has no structured constraint variant, so classify by message.
fn is_duplicate_key(err: &duckdb::Error) -> bool {
    let msg = err.to_string();
    msg.to_lowercase().contains("duplicate key")
        || (msg.contains("Constraint Error") && msg.contains("PRIMARY KEY"))
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
