//! `farmdb create` - scaffold new resources

use anyhow::{Context, Result};
use fdb_migrate::{create_migration, UnitKind};

use crate::cli::{CreateArgs, CreateMigrationArgs, CreateResource, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the create command
pub(crate) async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    match &args.resource {
        CreateResource::Migration(migration_args) => {
            execute_migration(migration_args, global).await
        }
    }
}

async fn execute_migration(args: &CreateMigrationArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let kind = UnitKind::from(args.kind);

    let path = create_migration(&ctx.migrations_dir, &args.name, kind)
        .with_context(|| format!("Failed to create migration '{}'", args.name))?;

    let shown = path
        .strip_prefix(&global.project_dir)
        .unwrap_or(&path)
        .display();
    println!("✓ Created migration: {shown}");
    if kind == UnitKind::Compiled {
        println!("  Register its `up` function in migrations/mod.rs before applying it.");
    }
    Ok(())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
