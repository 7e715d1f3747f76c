//! fdb-core - Core library for farmdb
//!
//! This crate provides the settings layer and the shared types used by the
//! database, migration, and CLI crates.

pub mod error;
pub mod migration_name;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use migration_name::MigrationName;
pub use settings::{Environment, Settings};
