//! Error types for fdb-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Operation attempted before `connect()` (D002)
    #[error("[D002] Database is not connected. Call connect() first.")]
    NotConnected,

    /// Transaction management error (D003)
    #[error("[D003] Database transaction failed: {0}")]
    TransactionError(String),

    /// DuckDB driver error with preserved source chain (D004)
    #[error("[D004] DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
