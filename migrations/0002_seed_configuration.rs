//! Migration: seed configuration
//!
//! Registered with the migration loader under "0002_seed_configuration".

use duckdb::Connection;

pub fn up(conn: &Connection) -> duckdb::Result<()> {
    conn.execute(
        "INSERT INTO v1.configuration (key, value) VALUES (?, ?) ON CONFLICT DO NOTHING",
        duckdb::params!["schema_version", "1"],
    )?;
    Ok(())
}
