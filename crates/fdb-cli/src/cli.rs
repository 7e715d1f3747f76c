//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use fdb_migrate::UnitKind;
use std::path::PathBuf;

/// farmdb - Professional farm management tooling
#[derive(Parser, Debug)]
#[command(name = "farmdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override database path (or :memory:)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Override migrations directory
    #[arg(short, long, global = true)]
    pub migrations_dir: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Database migration commands
    Migration(MigrationArgs),

    /// Create a new resource
    Create(CreateArgs),
}

/// Arguments for the migration command
#[derive(Args, Debug)]
pub struct MigrationArgs {
    #[command(subcommand)]
    pub command: MigrationCommands,
}

/// Migration subcommands
#[derive(Subcommand, Debug)]
pub enum MigrationCommands {
    /// Apply all pending migrations
    Apply,

    /// Show migration status
    Status(StatusArgs),
}

/// Arguments for `migration status`
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub resource: CreateResource,
}

/// Resources that can be created
#[derive(Subcommand, Debug)]
pub enum CreateResource {
    /// Create a new migration file
    Migration(CreateMigrationArgs),
}

/// Arguments for `create migration`
#[derive(Args, Debug)]
pub struct CreateMigrationArgs {
    /// Name of the migration (e.g. "create farms table")
    pub name: String,

    /// Kind of migration unit to generate
    #[arg(short, long, value_enum, default_value = "sql")]
    pub kind: MigrationKind,
}

/// Migration unit kinds selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    /// SQL script
    Sql,
    /// Rust function compiled into the binary
    Rust,
}

impl From<MigrationKind> for UnitKind {
    fn from(kind: MigrationKind) -> Self {
        match kind {
            MigrationKind::Sql => UnitKind::Sql,
            MigrationKind::Rust => UnitKind::Compiled,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
