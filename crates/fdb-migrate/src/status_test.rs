use super::*;
use std::collections::HashSet;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_status_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    let conn = Connection::open_in_memory().unwrap();

    let report = Migrator::new(dir.path().join("nope")).status(&conn).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.applied_count(), 0);
    assert_eq!(report.pending_count(), 0);
}

#[test]
fn test_status_marks_applied_and_pending() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("0001_a.sql"), "CREATE TABLE a (id INTEGER);").unwrap();
    fs::write(dir.path().join("0002_b.sql"), "CREATE TABLE b (id INTEGER);").unwrap();
    let conn = Connection::open_in_memory().unwrap();
    let migrator = Migrator::new(dir.path());

    let before = migrator.status(&conn).unwrap();
    assert_eq!(before.pending_names(), vec!["0001_a", "0002_b"]);
    assert!(before.units.iter().all(|u| u.applied_at.is_none()));

    migrator.run(&conn).unwrap();
    fs::write(dir.path().join("0003_c.sql"), "CREATE TABLE c (id INTEGER);").unwrap();

    let after = migrator.status(&conn).unwrap();
    assert_eq!(after.applied_count(), 2);
    assert_eq!(after.pending_names(), vec!["0003_c"]);
    assert!(after.units[0].applied_at.is_some());
}

#[test]
fn test_status_matches_ledger() {
    let dir = tempdir().unwrap();
    for name in ["0001_a", "0002_b", "0003_c"] {
        fs::write(dir.path().join(format!("{name}.sql")), "SELECT 1;").unwrap();
    }
    let conn = Connection::open_in_memory().unwrap();
    let migrator = Migrator::new(dir.path());
    ledger::ensure_initialized(&conn).unwrap();
    ledger::record(&conn, "0002_b", Utc::now()).unwrap();

    let report = migrator.status(&conn).unwrap();
    let applied: HashSet<String> = report
        .units
        .iter()
        .filter(|u| u.applied)
        .map(|u| u.name.clone())
        .collect();

    assert_eq!(applied, ledger::applied_names(&conn).unwrap());
    let pending: Vec<String> = migrator
        .pending(&conn)
        .unwrap()
        .into_iter()
        .map(|u| u.name.into_inner())
        .collect();
    assert_eq!(report.pending_names(), pending);
}

#[test]
fn test_status_lists_orphaned_ledger_entries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("0002_b.sql"), "SELECT 1;").unwrap();
    let conn = Connection::open_in_memory().unwrap();
    ledger::ensure_initialized(&conn).unwrap();
    ledger::record(&conn, "0001_removed", Utc::now()).unwrap();

    let report = Migrator::new(dir.path()).status(&conn).unwrap();

    assert_eq!(report.units.len(), 2);
    assert_eq!(report.units[0].name, "0001_removed");
    assert!(report.units[0].applied);
    assert!(report.units[0].missing_on_disk);
    assert!(!report.units[1].missing_on_disk);
    assert_eq!(report.applied_count(), 1);
}
