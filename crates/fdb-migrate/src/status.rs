//! Read-only migration status.

use crate::error::MigrateResult;
use crate::ledger;
use crate::runner::Migrator;
use chrono::{DateTime, Utc};
use duckdb::Connection;
use serde::Serialize;
use std::collections::HashMap;

/// Applied state of one migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    /// Migration name
    pub name: String,
    /// Whether the ledger records this unit
    pub applied: bool,
    /// Ledger timestamp, `None` while pending
    pub applied_at: Option<DateTime<Utc>>,
    /// Recorded in the ledger but no longer present on disk
    pub missing_on_disk: bool,
}

/// Status of every known migration, ordered by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    /// One entry per discovered unit or ledger row
    pub units: Vec<UnitStatus>,
}

impl StatusReport {
    /// Number of applied migrations (equals the ledger size)
    pub fn applied_count(&self) -> usize {
        self.units.iter().filter(|u| u.applied).count()
    }

    /// Number of migrations a run would apply
    pub fn pending_count(&self) -> usize {
        self.units.iter().filter(|u| !u.applied).count()
    }

    /// Names of pending migrations, in application order
    pub fn pending_names(&self) -> Vec<&str> {
        self.units
            .iter()
            .filter(|u| !u.applied)
            .map(|u| u.name.as_str())
            .collect()
    }

    /// Whether no migration is known at all
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl Migrator {
    /// Report which units are applied and which are pending.
    ///
    /// Reads the same ledger and discovery results `run` uses. Ledger rows
    /// whose unit file is gone are listed as applied and flagged
    /// `missing_on_disk`.
    pub fn status(&self, conn: &Connection) -> MigrateResult<StatusReport> {
        ledger::ensure_initialized(conn)?;
        let mut recorded: HashMap<String, DateTime<Utc>> = ledger::entries(conn)?
            .into_iter()
            .map(|entry| (entry.name, entry.applied_at))
            .collect();

        let mut units: Vec<UnitStatus> = self
            .discover()?
            .into_iter()
            .map(|unit| {
                let applied_at = recorded.remove(unit.name.as_str());
                UnitStatus {
                    name: unit.name.into_inner(),
                    applied: applied_at.is_some(),
                    applied_at,
                    missing_on_disk: false,
                }
            })
            .collect();

        if !recorded.is_empty() {
            log::warn!(
                "{} applied migration(s) have no file in {}",
                recorded.len(),
                self.migrations_dir().display()
            );
        }
        units.extend(recorded.into_iter().map(|(name, applied_at)| UnitStatus {
            name,
            applied: true,
            applied_at: Some(applied_at),
            missing_on_disk: true,
        }));
        units.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(StatusReport { units })
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
