//! Migration unit contract and loader.
//!
//! A unit is either a `.sql` script interpreted by DuckDB or a compiled
//! Rust function registered with the [`UnitLoader`] under the unit's name.
//! Both end up as a [`LoadedUnit`] exposing a single `apply` operation.

use crate::error::{MigrateError, MigrateResult};
use duckdb::Connection;
use fdb_core::MigrationName;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Module initializer that may sit next to compiled units; never a unit.
pub const RESERVED_INITIALIZER: &str = "mod.rs";

/// Leading keywords of statements that open or close a transaction.
const TRANSACTION_KEYWORDS: [&str; 6] = ["BEGIN", "START", "COMMIT", "END", "ROLLBACK", "ABORT"];

/// Entry point of a compiled migration unit.
///
/// Runs inside the runner's transaction and must not begin, commit, or roll
/// back one itself.
pub type ApplyFn = fn(&Connection) -> duckdb::Result<()>;

/// How a unit's logic is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// SQL script executed as a batch
    Sql,
    /// Rust source compiled into the binary and registered by name
    Compiled,
}

impl UnitKind {
    /// Map a file extension to a unit kind; `None` for unrecognized extensions.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "sql" => Some(UnitKind::Sql),
            "rs" => Some(UnitKind::Compiled),
            _ => None,
        }
    }

    /// File extension used when authoring a unit of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            UnitKind::Sql => "sql",
            UnitKind::Compiled => "rs",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Sql => write!(f, "sql"),
            UnitKind::Compiled => write!(f, "rust"),
        }
    }
}

/// A discovered migration unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    /// File stem, e.g. `0001_create_farms_table`
    pub name: MigrationName,
    /// Path of the unit file
    pub source_location: PathBuf,
    /// Script or compiled unit
    pub kind: UnitKind,
}

impl MigrationUnit {
    /// Numeric sequence prefix, `None` when it does not parse as an integer.
    pub fn sequence(&self) -> Option<u32> {
        self.name.sequence()
    }
}

/// A unit whose entry point has been resolved and is ready to apply.
#[derive(Clone)]
pub enum LoadedUnit {
    /// SQL script contents
    Script { name: String, sql: String },
    /// Registered compiled entry point
    Compiled { name: String, apply: ApplyFn },
}

impl fmt::Debug for LoadedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadedUnit::Script { name, sql } => f
                .debug_struct("Script")
                .field("name", name)
                .field("sql_len", &sql.len())
                .finish(),
            LoadedUnit::Compiled { name, .. } => {
                f.debug_struct("Compiled").field("name", name).finish()
            }
        }
    }
}

impl LoadedUnit {
    /// Name of the unit
    pub fn name(&self) -> &str {
        match self {
            LoadedUnit::Script { name, .. } | LoadedUnit::Compiled { name, .. } => name,
        }
    }

    /// Run the unit against `conn`.
    ///
    /// Any failure is an [`MigrateError::Execution`] carrying the original
    /// DuckDB error.
    pub fn apply(&self, conn: &Connection) -> MigrateResult<()> {
        let result = match self {
            LoadedUnit::Script { name, sql } => {
                if !has_statements(sql) {
                    log::debug!("Migration {name} has no statements, nothing to execute");
                    return Ok(());
                }
                conn.execute_batch(sql)
            }
            LoadedUnit::Compiled { apply, .. } => apply(conn),
        };
        result.map_err(|source| MigrateError::Execution {
            name: self.name().to_string(),
            source,
        })
    }
}

/// Resolves migration units to their entry points.
///
/// The registry of compiled units is built once and reused for every unit of
/// a run.
#[derive(Clone, Default)]
pub struct UnitLoader {
    registry: HashMap<String, ApplyFn>,
}

impl fmt::Debug for UnitLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.registry.keys().collect();
        names.sort();
        f.debug_struct("UnitLoader").field("registered", &names).finish()
    }
}

impl UnitLoader {
    /// Create a loader with no compiled units registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the entry point for a compiled unit named `name`.
    pub fn register(mut self, name: impl Into<String>, apply: ApplyFn) -> Self {
        self.registry.insert(name.into(), apply);
        self
    }

    /// Whether a compiled entry point is registered for `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Resolve `unit` to its entry point.
    ///
    /// Fails with [`MigrateError::Load`] when the script cannot be read, when
    /// it contains transaction control statements, or when no compiled entry
    /// point is registered for the unit.
    pub fn load(&self, unit: &MigrationUnit) -> MigrateResult<LoadedUnit> {
        let name = unit.name.to_string();
        match unit.kind {
            UnitKind::Sql => {
                let sql = std::fs::read_to_string(&unit.source_location).map_err(|e| {
                    MigrateError::Load {
                        name: name.clone(),
                        reason: format!("cannot read {}: {e}", unit.source_location.display()),
                    }
                })?;
                if let Some(keyword) = transaction_control(&sql) {
                    return Err(MigrateError::Load {
                        name,
                        reason: format!(
                            "transaction control statement {keyword} in {}",
                            unit.source_location.display()
                        ),
                    });
                }
                Ok(LoadedUnit::Script { name, sql })
            }
            UnitKind::Compiled => match self.registry.get(&name) {
                Some(apply) => Ok(LoadedUnit::Compiled { name, apply: *apply }),
                None => Err(MigrateError::Load {
                    reason: format!(
                        "no compiled entry point registered for {}",
                        unit.source_location.display()
                    ),
                    name,
                }),
            },
        }
    }
}

/// Split a script into its statements, without comments.
///
/// Quoted strings and identifiers are kept intact, so a `;` inside them does
/// not end a statement. Empty statements are dropped.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                current.push(c);
                for quoted in chars.by_ref() {
                    current.push(quoted);
                    if quoted == c {
                        break;
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        current.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                current.push(' ');
            }
            ';' => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_statement(&mut statements, &current);
    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

/// Whether `sql` contains anything besides whitespace, comments and `;`.
fn has_statements(sql: &str) -> bool {
    !split_statements(sql).is_empty()
}

/// First transaction control keyword (`BEGIN`, `COMMIT`, ...) that starts a
/// statement of `sql`, uppercased.
fn transaction_control(sql: &str) -> Option<String> {
    split_statements(sql).into_iter().find_map(|statement| {
        let keyword = statement
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_ascii_uppercase();
        TRANSACTION_KEYWORDS
            .contains(&keyword.as_str())
            .then_some(keyword)
    })
}

#[cfg(test)]
#[path = "unit_test.rs"]
mod tests;
