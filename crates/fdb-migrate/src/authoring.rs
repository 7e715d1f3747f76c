//! Authoring new migration units.
//!
//! New units get the next free sequence number, zero-padded so that name
//! order stays equal to sequence order.

use crate::discovery::list_units;
use crate::error::{MigrateError, MigrateResult};
use crate::unit::UnitKind;
use fdb_core::migration_name::{MigrationName, MAX_SEQUENCE};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const SQL_TEMPLATE: &str = "-- Migration: {name}
--
-- Statements in this file run in a single transaction together with the
-- ledger insert for this migration.
";

const RUST_TEMPLATE: &str = "//! Migration: {name}
//!
//! Register `up` with the migration loader under \"{unit}\".

use duckdb::Connection;

pub fn up(conn: &Connection) -> duckdb::Result<()> {
    let _ = conn;
    Ok(())
}
";

/// Next free sequence number in `dir`.
///
/// Returns 1 for a missing or empty directory. Units whose prefix does not
/// parse as an integer are ignored.
pub fn next_sequence(dir: &Path) -> MigrateResult<u32> {
    let highest = list_units(dir)?
        .iter()
        .filter_map(|unit| unit.sequence())
        .max()
        .unwrap_or(0);
    Ok(highest + 1)
}

/// Normalize a human-entered description: lowercase, `-` and spaces become `_`.
pub fn sanitize_name(name: &str) -> MigrateResult<String> {
    let invalid = |reason: &str| MigrateError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let safe = name.trim().to_lowercase().replace(['-', ' '], "_");
    if safe.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if safe.contains('/') || safe.contains('\\') || safe.contains("..") {
        return Err(invalid("name must not contain '/', '\\' or '..'"));
    }
    Ok(safe)
}

/// Write a new migration skeleton into `dir` and return its path.
///
/// Creates `dir` if needed and never overwrites an existing file.
pub fn create_migration(dir: &Path, name: &str, kind: UnitKind) -> MigrateResult<PathBuf> {
    let safe_name = sanitize_name(name)?;
    let sequence = next_sequence(dir)?;
    if sequence > MAX_SEQUENCE {
        return Err(MigrateError::SequenceExhausted {
            sequence,
            max: MAX_SEQUENCE,
        });
    }

    std::fs::create_dir_all(dir).map_err(|source| MigrateError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let unit_name = MigrationName::compose(sequence, &safe_name);
    let path = dir.join(format!("{unit_name}.{}", kind.extension()));
    let template = match kind {
        UnitKind::Sql => SQL_TEMPLATE,
        UnitKind::Compiled => RUST_TEMPLATE,
    };
    let contents = template
        .replace("{name}", name.trim())
        .replace("{unit}", unit_name.as_str());

    let io_err = |source: std::io::Error| MigrateError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                MigrateError::AlreadyExists {
                    path: path.display().to_string(),
                }
            } else {
                io_err(e)
            }
        })?;
    file.write_all(contents.as_bytes()).map_err(io_err)?;

    log::info!("Created migration {}", path.display());
    Ok(path)
}

#[cfg(test)]
#[path = "authoring_test.rs"]
mod tests;
