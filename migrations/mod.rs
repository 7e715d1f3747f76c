//! Compiled migration units.
//!
//! Every `NNNN_name.rs` file in this directory is a migration unit whose
//! `up` function must be registered in [`loader`] under the file stem.
//! SQL units need no registration.

use fdb_migrate::UnitLoader;

#[path = "0002_seed_configuration.rs"]
mod seed_configuration;

/// Loader with every compiled unit of this directory registered.
pub(crate) fn loader() -> UnitLoader {
    UnitLoader::new().register("0002_seed_configuration", seed_configuration::up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdb_migrate::Migrator;
    use std::path::Path;

    #[test]
    fn bundled_migrations_apply_cleanly() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
        let conn = duckdb::Connection::open_in_memory().unwrap();
        let migrator = Migrator::new(dir).with_loader(loader());

        assert_eq!(migrator.run(&conn).unwrap(), 2);
        let value: String = conn
            .query_row(
                "SELECT value FROM v1.configuration WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(value, "1");
    }

    #[test]
    fn every_compiled_unit_is_registered() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
        let units = fdb_migrate::discover(&dir).unwrap();
        let loader = loader();
        for unit in units
            .iter()
            .filter(|u| u.kind == fdb_migrate::UnitKind::Compiled)
        {
            assert!(loader.is_registered(unit.name.as_str()), "{} not registered", unit.name);
        }
    }
}
