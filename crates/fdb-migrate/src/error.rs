//! Error types for the migration runner.

use fdb_db::DbError;
use thiserror::Error;

/// Migration runner errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A unit's source could not be loaded or has no entry point (G001).
    #[error("[G001] Failed to load migration {name}: {reason}")]
    Load { name: String, reason: String },

    /// A unit's logic ran and failed (G002). The DuckDB message is kept verbatim.
    #[error("[G002] Migration {name} failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: duckdb::Error,
    },

    /// The ledger already holds an entry for this name (G003).
    #[error("[G003] Migration {name} is already recorded in the ledger")]
    LedgerIntegrity { name: String },

    /// Reading or writing the ledger table failed (G004).
    #[error("[G004] Migration ledger query failed: {0}")]
    Ledger(#[source] duckdb::Error),

    /// Connection or transaction failure (G005).
    #[error("[G005] {0}")]
    Db(#[from] DbError),

    /// Filesystem error with path context (G006).
    #[error("[G006] IO error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Two files share the same migration name (G007).
    #[error("[G007] Duplicate migration name {name}: {first} and {second}")]
    DuplicateUnit {
        name: String,
        first: String,
        second: String,
    },

    /// A requested migration name cannot be used (G008).
    #[error("[G008] Invalid migration name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// No sequence number left in the fixed-width prefix (G009).
    #[error("[G009] Migration sequence {sequence} exceeds {max}")]
    SequenceExhausted { sequence: u32, max: u32 },

    /// Refusing to overwrite an existing migration file (G010).
    #[error("[G010] Migration file already exists: {path}")]
    AlreadyExists { path: String },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

/// A run that stopped at its first error.
///
/// `applied` counts the units whose transactions committed before the
/// failure; those stay recorded in the ledger.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RunAborted {
    /// Units committed before the failure
    pub applied: usize,
    /// The first error encountered, unmodified
    pub error: MigrateError,
}
