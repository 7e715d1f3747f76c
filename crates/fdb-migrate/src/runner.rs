//! Migration runner.
//!
//! Computes the pending set (discovered units not in the ledger) and applies
//! it in name order. Each unit gets its own transaction covering load, apply
//! and the ledger insert, so a failure leaves neither a partial schema change
//! nor a ledger row behind. The first failure ends the run.

use crate::discovery::discover;
use crate::error::{MigrateError, MigrateResult, RunAborted};
use crate::ledger;
use crate::unit::{MigrationUnit, UnitLoader};
use chrono::Utc;
use duckdb::Connection;
use fdb_db::with_transaction;
use std::path::{Path, PathBuf};

/// Progress notifications emitted by [`Migrator::run_with`].
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// The unit's transaction is about to open
    Applying(&'a MigrationUnit),
    /// The unit's transaction committed
    Applied(&'a MigrationUnit),
    /// The unit failed; the run stops after this event
    Failed(&'a MigrationUnit, &'a MigrateError),
}

/// Applies the migration units of one directory to a database.
#[derive(Debug, Clone)]
pub struct Migrator {
    migrations_dir: PathBuf,
    loader: UnitLoader,
}

impl Migrator {
    /// Create a runner for `migrations_dir` with no compiled units registered.
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
            loader: UnitLoader::new(),
        }
    }

    /// Use `loader` to resolve unit entry points.
    pub fn with_loader(mut self, loader: UnitLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Directory units are discovered in
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// All units on disk, sorted by name.
    pub fn discover(&self) -> MigrateResult<Vec<MigrationUnit>> {
        discover(&self.migrations_dir)
    }

    /// Units not yet recorded in the ledger, in application order.
    ///
    /// Creates the ledger table if needed. The ledger is read once; nothing
    /// guards against other writers changing it afterwards.
    pub fn pending(&self, conn: &Connection) -> MigrateResult<Vec<MigrationUnit>> {
        ledger::ensure_initialized(conn)?;
        let applied = ledger::applied_names(conn)?;
        let pending = self
            .discover()?
            .into_iter()
            .filter(|unit| {
                let done = applied.contains(unit.name.as_str());
                if done {
                    log::debug!("Migration {} already applied, skipping", unit.name);
                }
                !done
            })
            .collect();
        Ok(pending)
    }

    /// Apply all pending units and return how many committed.
    pub fn run(&self, conn: &Connection) -> Result<usize, RunAborted> {
        self.run_with(conn, |_| {})
    }

    /// Like [`run`](Self::run), reporting each unit's progress to `on_event`.
    pub fn run_with<F>(&self, conn: &Connection, mut on_event: F) -> Result<usize, RunAborted>
    where
        F: FnMut(RunEvent<'_>),
    {
        let pending = self
            .pending(conn)
            .map_err(|error| RunAborted { applied: 0, error })?;

        if pending.is_empty() {
            log::info!("No pending migrations");
            return Ok(0);
        }
        log::info!("{} pending migration(s)", pending.len());

        let mut applied = 0;
        for unit in &pending {
            on_event(RunEvent::Applying(unit));
            log::info!("Applying migration {}", unit.name);

            if let Err(error) = self.apply_unit(conn, unit) {
                log::error!(
                    "Migration {} failed, stopping after {applied} applied: {error}",
                    unit.name
                );
                on_event(RunEvent::Failed(unit, &error));
                return Err(RunAborted { applied, error });
            }

            applied += 1;
            log::info!("Migration {} committed", unit.name);
            on_event(RunEvent::Applied(unit));
        }

        Ok(applied)
    }

    /// Load, apply and record one unit inside a single transaction.
    fn apply_unit(&self, conn: &Connection, unit: &MigrationUnit) -> MigrateResult<()> {
        with_transaction(conn, |conn| {
            let loaded = self.loader.load(unit)?;
            loaded.apply(conn)?;
            ledger::record(conn, unit.name.as_str(), Utc::now())
        })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
