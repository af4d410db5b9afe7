//! GeoIP database loading from the database directory.

use maxminddb::Reader;
use std::path::{Path, PathBuf};

use crate::error_handling::GeoIpError;
use crate::geoip::lookup::MmdbDatabase;
use crate::geoip::metadata::{extract_metadata, verify_database_kind};
use crate::geoip::types::DatabaseKind;
use crate::geoip::GeoDatabase;

/// Picks the file to load for `kind`: the paid edition if present, otherwise
/// the free edition. `None` when neither exists.
pub(crate) fn resolve_database_path(dir: &Path, kind: DatabaseKind) -> Option<PathBuf> {
    [kind.paid_file_name(), kind.free_file_name()]
        .into_iter()
        .map(|file_name| dir.join(file_name))
        .find(|path| path.is_file())
}

/// Loads a GeoIP database from a local file path.
///
/// The whole file is read into memory; lookups never touch the disk again.
pub(crate) fn load_from_file(kind: DatabaseKind, path: &Path) -> Result<MmdbDatabase, GeoIpError> {
    log::info!("Loading {} database from: {}", kind, path.display());

    let db_bytes = std::fs::read(path).map_err(|source| GeoIpError::DatabaseRead {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = Reader::from_source(db_bytes).map_err(|source| GeoIpError::DatabaseOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata = extract_metadata(&reader, path);
    verify_database_kind(kind, &metadata)?;

    log::info!(
        "{} database loaded: {} ({})",
        kind,
        metadata.database_type,
        metadata.version
    );

    Ok(MmdbDatabase::new(kind, reader, metadata))
}

/// Opens the database file for `kind` as a boxed handle.
pub(crate) fn open_database(
    kind: DatabaseKind,
    path: &Path,
) -> Result<Box<dyn GeoDatabase>, GeoIpError> {
    Ok(Box::new(load_from_file(kind, path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_paid_edition() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("GeoIP2-City.mmdb"), b"paid").unwrap();
        std::fs::write(temp_dir.path().join("GeoLite2-City.mmdb"), b"free").unwrap();

        let path = resolve_database_path(temp_dir.path(), DatabaseKind::City).unwrap();
        assert_eq!(path, temp_dir.path().join("GeoIP2-City.mmdb"));
    }

    #[test]
    fn test_resolve_falls_back_to_free_edition() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("GeoLite2-ASN.mmdb"), b"free").unwrap();

        let path = resolve_database_path(temp_dir.path(), DatabaseKind::Asn).unwrap();
        assert_eq!(path, temp_dir.path().join("GeoLite2-ASN.mmdb"));
    }

    #[test]
    fn test_resolve_missing_database() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("GeoLite2-City.mmdb"), b"free").unwrap();

        assert!(resolve_database_path(temp_dir.path(), DatabaseKind::Isp).is_none());
    }

    #[test]
    fn test_resolve_ignores_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir(temp_dir.path().join("GeoIP2-Domain.mmdb")).unwrap();

        assert!(resolve_database_path(temp_dir.path(), DatabaseKind::Domain).is_none());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let nonexistent_path = Path::new("nonexistent")
            .join("path")
            .join("GeoLite2-City.mmdb");
        let err = load_from_file(DatabaseKind::City, &nonexistent_path).unwrap_err();
        assert!(
            matches!(err, GeoIpError::DatabaseRead { .. }),
            "Expected read error, got: {:?}",
            err
        );
        assert!(err.to_string().contains("GeoLite2-City.mmdb"));
    }

    #[test]
    fn test_load_from_file_invalid_database() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("GeoLite2-City.mmdb");
        std::fs::write(&db_path, b"not a valid mmdb file").expect("Failed to write test data");

        let err = load_from_file(DatabaseKind::City, &db_path).unwrap_err();
        assert!(
            matches!(err, GeoIpError::DatabaseOpen { .. }),
            "Expected open error, got: {:?}",
            err
        );
        assert_eq!(
            err.to_string(),
            format!("There was an issue with the \"{}\" database.", db_path.display())
        );
    }

    #[test]
    fn test_load_from_file_empty_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("GeoIP2-ISP.mmdb");
        std::fs::write(&db_path, b"").expect("Failed to write test data");

        assert!(open_database(DatabaseKind::Isp, &db_path).is_err());
    }
}
