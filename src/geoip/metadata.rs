//! Metadata management for GeoIP databases.
//!
//! This module provides functions to extract database metadata and to check
//! that a file holds the kind of data its name promises.

use maxminddb::Reader;
use std::path::Path;

use super::types::{DatabaseKind, DatabaseMetadata};
use crate::error_handling::GeoIpError;

/// Extracts metadata from a GeoIP database
pub(crate) fn extract_metadata<T: AsRef<[u8]>>(
    reader: &Reader<T>,
    path: &Path,
) -> DatabaseMetadata {
    describe_database(
        path,
        &reader.metadata.database_type,
        reader.metadata.build_epoch,
    )
}

/// Builds the metadata record from the raw metadata values.
pub(crate) fn describe_database(
    path: &Path,
    database_type: &str,
    build_epoch: u64,
) -> DatabaseMetadata {
    DatabaseMetadata {
        path: path.to_path_buf(),
        database_type: database_type.to_string(),
        version: format!("build_{}", build_epoch),
    }
}

/// Fails when the file's `database_type` cannot serve `kind` lookups.
pub(crate) fn verify_database_kind(
    kind: DatabaseKind,
    metadata: &DatabaseMetadata,
) -> Result<(), GeoIpError> {
    if kind.accepts_database_type(&metadata.database_type) {
        Ok(())
    } else {
        Err(GeoIpError::DatabaseKindMismatch {
            path: metadata.path.clone(),
            expected: kind,
            found: metadata.database_type.clone(),
        })
    }
}
