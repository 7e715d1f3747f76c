use super::*;
use crate::cli::{CreateMigrationArgs, MigrationKind};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn global_for(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_path_buf(),
        config: None,
        database: None,
        migrations_dir: None,
    }
}

fn create_args(name: &str, kind: MigrationKind) -> CreateArgs {
    CreateArgs {
        resource: CreateResource::Migration(CreateMigrationArgs {
            name: name.to_string(),
            kind,
        }),
    }
}

#[tokio::test]
async fn test_create_migration_in_default_dir() {
    let temp_dir = tempdir().unwrap();
    let global = global_for(temp_dir.path());

    execute(&create_args("Create Farms Table", MigrationKind::Sql), &global)
        .await
        .unwrap();
    execute(&create_args("seed-farms", MigrationKind::Rust), &global)
        .await
        .unwrap();

    let migrations = temp_dir.path().join("migrations");
    assert!(migrations.join("0001_create_farms_table.sql").exists());
    assert!(migrations.join("0002_seed_farms.rs").exists());
}

#[tokio::test]
async fn test_create_migration_respects_settings_dir() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("farmdb.yml"),
        "migrations_dir: db/migrations\n",
    )
    .unwrap();
    let global = global_for(temp_dir.path());

    execute(&create_args("add index", MigrationKind::Sql), &global)
        .await
        .unwrap();

    assert!(temp_dir
        .path()
        .join("db/migrations/0001_add_index.sql")
        .exists());
}

#[tokio::test]
async fn test_create_migration_rejects_empty_name() {
    let temp_dir = tempdir().unwrap();
    let global = global_for(temp_dir.path());

    let result = execute(&create_args("  ", MigrationKind::Sql), &global).await;
    assert!(result.is_err());
}
