//! GeoIP database selection and loading.
//!
//! This module turns the requested database names into open database handles:
//! unknown names and missing files are reported as warnings, files that exist
//! but cannot be opened stop the run.

mod loader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;

use crate::config::{ALL_DATABASES, DEFAULT_DATABASE};
use crate::error_handling::{GeoIpError, SetupWarning};
use crate::geoip::types::{normalize_database_name, DatabaseKind};
use crate::geoip::GeoDatabase;

use loader::{open_database, resolve_database_path};

/// Open database handles for one run, at most one per kind.
#[derive(Debug, Default)]
pub struct GeoDatabases {
    handles: HashMap<DatabaseKind, Box<dyn GeoDatabase>>,
}

impl GeoDatabases {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handle, replacing any handle of the same kind.
    pub fn insert(&mut self, database: Box<dyn GeoDatabase>) {
        self.handles.insert(database.kind(), database);
    }

    /// The handle for `kind`, if that database is open.
    pub fn get(&self, kind: DatabaseKind) -> Option<&dyn GeoDatabase> {
        self.handles.get(&kind).map(|handle| handle.as_ref())
    }

    /// Loaded handles in merge order (see [`DatabaseKind::PROCESSING_ORDER`]).
    pub fn in_processing_order(&self) -> impl Iterator<Item = &dyn GeoDatabase> + '_ {
        DatabaseKind::PROCESSING_ORDER
            .into_iter()
            .filter_map(|kind| self.get(kind))
    }

    /// Loaded kinds in merge order.
    pub fn kinds(&self) -> Vec<DatabaseKind> {
        self.in_processing_order()
            .map(|database| database.kind())
            .collect()
    }

    /// Number of open databases.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no database is open.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl FromIterator<Box<dyn GeoDatabase>> for GeoDatabases {
    fn from_iter<I: IntoIterator<Item = Box<dyn GeoDatabase>>>(iter: I) -> Self {
        let mut databases = GeoDatabases::new();
        for database in iter {
            databases.insert(database);
        }
        databases
    }
}

/// Result of the setup phase.
#[derive(Debug)]
pub struct DatabaseSetup {
    /// Handles that were opened
    pub databases: GeoDatabases,
    /// Non-fatal conditions, in the order they were found
    pub warnings: Vec<SetupWarning>,
}

/// Resolves requested names to database kinds.
///
/// An empty request selects `city`; the token `all` selects every kind.
/// Returns the selected kinds in declaration order plus one warning per
/// unrecognized name.
pub fn select_databases(requested: &[String]) -> (Vec<DatabaseKind>, Vec<SetupWarning>) {
    let default_request = [DEFAULT_DATABASE.to_string()];
    let requested = if requested.is_empty() {
        &default_request[..]
    } else {
        requested
    };

    let mut warnings = Vec::new();
    let mut wants_all = false;
    let mut wanted = Vec::new();

    for name in requested {
        if normalize_database_name(name) == ALL_DATABASES {
            wants_all = true;
            continue;
        }
        match DatabaseKind::from_requested(name) {
            Some(kind) => wanted.push(kind),
            None => warnings.push(SetupWarning::UnknownDatabase(name.clone())),
        }
    }

    let selected = DatabaseKind::iter()
        .filter(|kind| wants_all || wanted.contains(kind))
        .collect();

    (selected, warnings)
}

/// Selects and opens the requested databases from `dir`.
///
/// # Errors
///
/// - [`GeoIpError::DatabaseRead`] / [`GeoIpError::DatabaseOpen`] /
///   [`GeoIpError::DatabaseKindMismatch`] when a database file exists but is
///   unusable
/// - [`GeoIpError::NoDatabasesLoaded`] when no requested database was found
pub fn load_databases(requested: &[String], dir: &Path) -> Result<DatabaseSetup, GeoIpError> {
    load_databases_with(requested, dir, open_database)
}

/// Same as [`load_databases`] with a caller-supplied way of opening a file.
pub fn load_databases_with<F>(
    requested: &[String],
    dir: &Path,
    mut open: F,
) -> Result<DatabaseSetup, GeoIpError>
where
    F: FnMut(DatabaseKind, &Path) -> Result<Box<dyn GeoDatabase>, GeoIpError>,
{
    let (selected, mut warnings) = select_databases(requested);
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let mut databases = GeoDatabases::new();
    for kind in selected {
        match resolve_database_path(dir, kind) {
            Some(path) => databases.insert(open(kind, &path)?),
            None => {
                let warning = SetupWarning::DatabaseNotFound {
                    kind,
                    dir: display_dir(dir),
                };
                log::warn!("{}", warning);
                warnings.push(warning);
            }
        }
    }

    if databases.is_empty() {
        return Err(GeoIpError::NoDatabasesLoaded);
    }

    log::debug!("Databases loaded: {:?}", databases.kinds());

    Ok(DatabaseSetup {
        databases,
        warnings,
    })
}

fn display_dir(dir: &Path) -> PathBuf {
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}
