use super::*;
use std::fs;
use tempfile::tempdir;

fn touch(dir: &Path, file_name: &str) {
    fs::write(dir.join(file_name), "-- migration\n").unwrap();
}

fn names(units: &[MigrationUnit]) -> Vec<&str> {
    units.iter().map(|u| u.name.as_str()).collect()
}

#[test]
fn test_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    let units = discover(&dir.path().join("migrations")).unwrap();
    assert!(units.is_empty());
}

#[test]
fn test_empty_directory_is_empty() {
    let dir = tempdir().unwrap();
    assert!(discover(dir.path()).unwrap().is_empty());
}

#[test]
fn test_sorted_by_name() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "0002_b.sql");
    touch(dir.path(), "0010_c.sql");
    touch(dir.path(), "0001_a.sql");

    let units = discover(dir.path()).unwrap();
    assert_eq!(names(&units), vec!["0001_a", "0002_b", "0010_c"]);
}

#[test]
fn test_recognizes_sql_and_rust_units() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "0001_create_farms_table.sql");
    touch(dir.path(), "0002_seed_configuration.rs");

    let units = discover(dir.path()).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].kind, UnitKind::Sql);
    assert_eq!(units[1].kind, UnitKind::Compiled);
    assert_eq!(
        units[0].source_location,
        dir.path().join("0001_create_farms_table.sql")
    );
}

#[test]
fn test_pattern_applies_to_full_file_name() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "0003_.sql");

    let units = discover(dir.path()).unwrap();
    assert_eq!(names(&units), vec!["0003_"]);
    assert_eq!(units[0].sequence(), Some(3));
}

#[test]
fn test_skips_files_not_matching_pattern() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "0001_valid.sql");
    touch(dir.path(), "001_short_prefix.sql");
    touch(dir.path(), "00001_long_prefix.sql");
    touch(dir.path(), "0002.sql");
    touch(dir.path(), "create_table.sql");
    touch(dir.path(), "0004_notes.txt");
    touch(dir.path(), "0005_no_extension");
    touch(dir.path(), "README.md");

    let units = discover(dir.path()).unwrap();
    assert_eq!(names(&units), vec!["0001_valid"]);
}

#[test]
fn test_excludes_reserved_initializer() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "mod.rs");
    touch(dir.path(), "0001_a.rs");

    let units = discover(dir.path()).unwrap();
    assert_eq!(names(&units), vec!["0001_a"]);
}

#[test]
fn test_skips_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("0001_looks_like_unit.sql")).unwrap();
    touch(dir.path(), "0002_real.sql");

    let units = discover(dir.path()).unwrap();
    assert_eq!(names(&units), vec!["0002_real"]);
}

#[test]
fn test_non_numeric_digits_still_discovered() {
    let dir = tempdir().unwrap();
    // Arabic-Indic digits match `\d` but do not parse as u32
    touch(dir.path(), "\u{661}\u{662}\u{663}\u{664}_exotic.sql");
    touch(dir.path(), "0001_a.sql");

    let units = discover(dir.path()).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].sequence(), Some(1));
    assert_eq!(units[1].sequence(), None);
}

#[test]
fn test_duplicate_stem_is_rejected() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "0001_a.sql");
    touch(dir.path(), "0001_a.rs");

    let err = discover(dir.path()).unwrap_err();
    assert!(matches!(err, MigrateError::DuplicateUnit { ref name, .. } if name == "0001_a"));
}

#[test]
fn test_discovery_has_no_side_effects() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("migrations");
    discover(&missing).unwrap();
    assert!(!missing.exists());
}
