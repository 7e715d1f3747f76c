//! Runtime context for CLI commands

use anyhow::{Context, Result};
use fdb_core::Settings;
use fdb_db::DuckDbProvider;
use fdb_migrate::Migrator;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Resolved settings for one CLI invocation
pub(crate) struct RuntimeContext {
    /// Settings after file, environment, and flag overrides
    pub settings: Settings,

    /// Resolved database path (or `:memory:`)
    pub database_path: String,

    /// Resolved migrations directory
    pub migrations_dir: PathBuf,
}

impl RuntimeContext {
    /// Build the context: `.env`, then the settings file, then `FARMDB_*`
    /// variables, then command-line flags.
    ///
    /// Relative settings paths resolve against the settings file's directory,
    /// which is the project directory unless `--config` points elsewhere.
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = args.project_dir.as_path();

        match dotenvy::from_path(root.join(".env")) {
            Ok(()) => log::debug!("Loaded {}", root.join(".env").display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }

        let (mut settings, settings_root) = match &args.config {
            Some(path) => (
                Settings::load(path).context("Failed to load settings file")?,
                config_dir(path),
            ),
            None => (
                Settings::load_from_dir(root).context("Failed to load project settings")?,
                root,
            ),
        };
        settings
            .apply_env_overrides()
            .context("Invalid FARMDB_* environment variable")?;

        let database_path = match &args.database {
            Some(path) => path.clone(),
            None => settings.database_path_absolute(settings_root),
        };
        let migrations_dir = match &args.migrations_dir {
            Some(dir) => dir.clone(),
            None => settings.migrations_dir_absolute(settings_root),
        };

        log::debug!(
            "farmdb {} ({} environment), database {}, migrations in {}",
            settings.version,
            settings.environment,
            database_path,
            migrations_dir.display()
        );

        Ok(Self {
            settings,
            database_path,
            migrations_dir,
        })
    }

    /// Disconnected provider for the configured database
    pub fn provider(&self) -> DuckDbProvider {
        DuckDbProvider::new(self.database_path.clone())
    }

    /// Runner over the configured migrations directory with the compiled
    /// units of this binary registered
    pub fn migrator(&self) -> Migrator {
        Migrator::new(&self.migrations_dir).with_loader(crate::migrations::loader())
    }
}

/// Directory holding the settings file at `path`
fn config_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
