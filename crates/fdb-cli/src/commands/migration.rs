//! `farmdb migration` - apply and inspect schema migrations

use anyhow::{Context, Result};
use fdb_db::ConnectionProvider;
use fdb_migrate::{RunEvent, StatusReport};
use std::io::Write;

use crate::cli::{GlobalArgs, MigrationArgs, MigrationCommands, StatusArgs};
use crate::commands::common::{migrations_word, ExitCode};
use crate::context::RuntimeContext;

/// Execute the migration command
pub(crate) async fn execute(args: &MigrationArgs, global: &GlobalArgs) -> Result<()> {
    match &args.command {
        MigrationCommands::Apply => execute_apply(global).await,
        MigrationCommands::Status(status_args) => execute_status(status_args, global).await,
    }
}

async fn execute_apply(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let migrator = ctx.migrator();
    let mut provider = ctx.provider();

    println!(
        "Connecting to database {} ({} environment)...",
        provider.path(),
        ctx.settings.environment
    );
    provider.connect().context("Failed to connect to database")?;

    let result = {
        let conn = provider.get_active()?;
        migrator.run_with(conn, |event| match event {
            RunEvent::Applying(unit) => {
                print!("  Applying {}...", unit.name);
                let _ = std::io::stdout().flush();
            }
            RunEvent::Applied(_) => println!(" ✓"),
            RunEvent::Failed(_, _) => println!(" ✗"),
        })
    };

    if let Err(e) = provider.disconnect() {
        log::warn!("Failed to disconnect cleanly: {e}");
    }

    match result {
        Ok(0) => {
            println!("No pending migrations.");
            Ok(())
        }
        Ok(applied) => {
            println!(
                "\n✓ Applied {applied} {} successfully.",
                migrations_word(applied)
            );
            Ok(())
        }
        Err(aborted) => {
            eprintln!("✗ Migration failed: {}", aborted.error);
            if aborted.applied > 0 {
                eprintln!(
                    "  {} {} applied before the failure remain committed.",
                    aborted.applied,
                    migrations_word(aborted.applied)
                );
            }
            Err(ExitCode(1).into())
        }
    }
}

async fn execute_status(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let migrator = ctx.migrator();
    let mut provider = ctx.provider();
    provider
        .connect()
        .with_context(|| format!("Failed to connect to database {}", provider.path()))?;

    let report = migrator
        .status(provider.get_active()?)
        .context("Failed to read migration status");

    if let Err(e) = provider.disconnect() {
        log::warn!("Failed to disconnect cleanly: {e}");
    }
    let report = report?;

    if args.json {
        let output =
            serde_json::to_string_pretty(&report).context("Failed to serialize status")?;
        println!("{output}");
    } else {
        print_status(&report);
    }
    Ok(())
}

fn print_status(report: &StatusReport) {
    if report.is_empty() {
        println!("No migrations found.");
        return;
    }

    println!("Migration status:\n");
    for unit in &report.units {
        let marker = if unit.applied {
            "✓ applied"
        } else {
            "○ pending"
        };
        let note = if unit.missing_on_disk {
            "  (file missing)"
        } else {
            ""
        };
        println!("  {marker}  {}{note}", unit.name);
    }
    println!(
        "\n{} applied, {} pending",
        report.applied_count(),
        report.pending_count()
    );
    let pending = report.pending_names();
    if !pending.is_empty() {
        println!("Next to apply: {}", pending.join(", "));
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
