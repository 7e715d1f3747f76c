//! Settings types and parsing for farmdb.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings file names searched for in a project directory, in order.
pub const SETTINGS_FILE_NAMES: &[&str] = &["farmdb.yml", "farmdb.yaml"];

/// Environment variable overriding [`Settings::environment`].
pub const ENV_ENVIRONMENT: &str = "FARMDB_ENVIRONMENT";
/// Environment variable overriding [`Settings::version`].
pub const ENV_VERSION: &str = "FARMDB_VERSION";
/// Environment variable overriding [`Settings::database_path`].
pub const ENV_DATABASE_PATH: &str = "FARMDB_DATABASE_PATH";
/// Environment variable overriding [`Settings::migrations_dir`].
pub const ENV_MIGRATIONS_DIR: &str = "FARMDB_MIGRATIONS_DIR";

/// Special database path that opens an in-memory DuckDB database.
pub const MEMORY_DATABASE: &str = ":memory:";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Dev,
    /// Production
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(CoreError::ConfigInvalid {
                message: format!("unknown environment '{other}', expected 'dev' or 'prod'"),
            }),
        }
    }
}

/// Application settings from farmdb.yml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Application version reported by the CLI
    #[serde(default = "default_version")]
    pub version: String,

    /// DuckDB database file (or `:memory:`)
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Directory holding the migration units
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_database_path() -> String {
    "farm.db".to_string()
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            version: default_version(),
            database_path: default_database_path(),
            migrations_dir: default_migrations_dir(),
        }
    }
}

impl Settings {
    /// Load settings from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse settings from YAML text
    pub fn parse(content: &str) -> CoreResult<Self> {
        // An empty file deserializes to `null`, which means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a project directory, falling back to defaults when
    /// no settings file is present.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for file_name in SETTINGS_FILE_NAMES {
            let path = dir.join(file_name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No settings file in {}, using defaults",
            dir.display()
        );
        Ok(Self::default())
    }

    /// Apply `FARMDB_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> CoreResult<()> {
        if let Some(value) = read_env(ENV_ENVIRONMENT) {
            self.environment = value.parse()?;
        }
        if let Some(value) = read_env(ENV_VERSION) {
            self.version = value;
        }
        if let Some(value) = read_env(ENV_DATABASE_PATH) {
            self.database_path = value;
        }
        if let Some(value) = read_env(ENV_MIGRATIONS_DIR) {
            self.migrations_dir = value;
        }
        self.validate()
    }

    /// Database path resolved against `root`; `:memory:` is returned as is.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database_path == MEMORY_DATABASE {
            return self.database_path.clone();
        }
        resolve(root, &self.database_path).display().to_string()
    }

    /// Migrations directory resolved against `root`
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        resolve(root, &self.migrations_dir)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database_path cannot be empty".to_string(),
            });
        }
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
