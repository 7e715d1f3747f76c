//! Schema migration runner for farmdb.
//!
//! Discovers versioned migration units in a directory, tracks applied units
//! in the `_migrations` ledger table, and applies pending units in name
//! order, each inside its own transaction. The first failure stops the run;
//! units committed before it stay applied.

pub mod authoring;
pub mod discovery;
pub mod error;
pub mod ledger;
pub mod runner;
pub mod status;
pub mod unit;

pub use authoring::{create_migration, next_sequence, sanitize_name};
pub use discovery::discover;
pub use error::{MigrateError, MigrateResult, RunAborted};
pub use ledger::LedgerEntry;
pub use runner::{Migrator, RunEvent};
pub use status::{StatusReport, UnitStatus};
pub use unit::{ApplyFn, LoadedUnit, MigrationUnit, UnitKind, UnitLoader};
