//! Migration unit discovery.
//!
//! Units are files named `<4-digit sequence>_<description>.<ext>` directly
//! inside the migrations directory. Discovery is a pure read of the
//! filesystem and is repeated on every call.

use crate::error::{MigrateError, MigrateResult};
use crate::unit::{MigrationUnit, UnitKind, RESERVED_INITIALIZER};
use fdb_core::MigrationName;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// File names accepted as migration units; the stem becomes the unit name.
///
/// `\d` is Unicode-aware, so a prefix of non-ASCII digits still names a unit
/// even though its sequence does not parse.
fn unit_name_pattern() -> &'static Regex {
    static UNIT_NAME: OnceLock<Regex> = OnceLock::new();
    UNIT_NAME.get_or_init(|| Regex::new(r"^\d{4}_.+$").expect("valid regex literal"))
}

/// Discover all migration units in `dir`, sorted by name.
///
/// A missing directory yields an empty list. Two files with the same stem
/// (e.g. `0001_a.sql` and `0001_a.rs`) are rejected.
pub fn discover(dir: &Path) -> MigrateResult<Vec<MigrationUnit>> {
    let mut units = list_units(dir)?;
    units.sort_by(|a, b| a.name.cmp(&b.name));

    for pair in units.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(MigrateError::DuplicateUnit {
                name: pair[0].name.to_string(),
                first: pair[0].source_location.display().to_string(),
                second: pair[1].source_location.display().to_string(),
            });
        }
    }

    log::debug!("Discovered {} migration(s) in {}", units.len(), dir.display());
    Ok(units)
}

/// List migration units in `dir` in filesystem order.
pub(crate) fn list_units(dir: &Path) -> MigrateResult<Vec<MigrationUnit>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let io_err = |source: std::io::Error| MigrateError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut units = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(unit) = parse_unit_path(&path) {
            units.push(unit);
        }
    }
    Ok(units)
}

/// Turn a file path into a unit if its name follows the naming contract.
fn parse_unit_path(path: &Path) -> Option<MigrationUnit> {
    let file_name = path.file_name()?.to_str()?;
    if file_name == RESERVED_INITIALIZER {
        return None;
    }

    if !unit_name_pattern().is_match(file_name) {
        return None;
    }
    let kind = UnitKind::from_extension(path.extension()?.to_str()?)?;
    let stem = path.file_stem()?.to_str()?;

    Some(MigrationUnit {
        name: MigrationName::try_new(stem)?,
        source_location: path.to_path_buf(),
        kind,
    })
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
