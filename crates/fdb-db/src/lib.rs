//! fdb-db - Database layer for farmdb
//!
//! This crate provides the `ConnectionProvider` trait, its DuckDB
//! implementation, and the transaction helper used by the migration runner.

pub mod error;
pub mod provider;
pub mod transaction;

pub use error::{DbError, DbResult};
pub use provider::{relation_exists, ConnectionProvider, DuckDbProvider};
pub use transaction::with_transaction;

pub use duckdb::Connection;
