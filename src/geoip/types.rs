//! GeoIP data structures.
//!
//! This module defines the supported database kinds and the metadata kept
//! about each loaded database.

use std::fmt;
use std::path::PathBuf;

use strum_macros::EnumIter as EnumIterMacro;

use crate::config::{FREE_EDITION_PREFIX, MMDB_EXTENSION, PAID_EDITION_PREFIX};

/// A supported MaxMind database category.
///
/// Declaration order is the order databases are opened in; lookups run in
/// [`DatabaseKind::PROCESSING_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum DatabaseKind {
    /// GeoIP2 Anonymous IP: VPN, proxy, hosting and Tor flags
    AnonymousIp,
    /// GeoLite2 ASN: autonomous system number and organization
    Asn,
    /// GeoIP2/GeoLite2 City: country, subdivision, city, coordinates, postal code
    City,
    /// GeoIP2 Connection Type
    ConnectionType,
    /// GeoIP2 Domain: second-level domain of the address
    Domain,
    /// GeoIP2 Enterprise: location plus network traits
    Enterprise,
    /// GeoIP2 ISP: ASN data plus ISP and organization names
    Isp,
}

impl DatabaseKind {
    /// Order in which per-kind field sets are merged into an event.
    ///
    /// Later kinds overwrite same-named fields written by earlier kinds, so
    /// ISP values win over ASN values, and Enterprise values win over all.
    pub const PROCESSING_ORDER: [DatabaseKind; 7] = [
        DatabaseKind::AnonymousIp,
        DatabaseKind::Asn,
        DatabaseKind::ConnectionType,
        DatabaseKind::Domain,
        DatabaseKind::Isp,
        DatabaseKind::City,
        DatabaseKind::Enterprise,
    ];

    /// The kind's name as it appears in database file names.
    pub fn file_stem(&self) -> &'static str {
        match self {
            DatabaseKind::AnonymousIp => "Anonymous-IP",
            DatabaseKind::Asn => "ASN",
            DatabaseKind::City => "City",
            DatabaseKind::ConnectionType => "Connection-Type",
            DatabaseKind::Domain => "Domain",
            DatabaseKind::Enterprise => "Enterprise",
            DatabaseKind::Isp => "ISP",
        }
    }

    /// The name users request the kind by: the file stem lowercased with
    /// `-` replaced by `_`.
    pub fn option_name(&self) -> &'static str {
        match self {
            DatabaseKind::AnonymousIp => "anonymous_ip",
            DatabaseKind::Asn => "asn",
            DatabaseKind::City => "city",
            DatabaseKind::ConnectionType => "connection_type",
            DatabaseKind::Domain => "domain",
            DatabaseKind::Enterprise => "enterprise",
            DatabaseKind::Isp => "isp",
        }
    }

    /// Matches a requested database name, ignoring case and treating `-`
    /// like `_`.
    pub fn from_requested(name: &str) -> Option<Self> {
        let normalized = normalize_database_name(name);
        Self::PROCESSING_ORDER
            .into_iter()
            .find(|kind| kind.option_name() == normalized)
    }

    /// File name of the commercial edition, e.g. `GeoIP2-City.mmdb`.
    pub fn paid_file_name(&self) -> String {
        format!(
            "{}-{}.{}",
            PAID_EDITION_PREFIX,
            self.file_stem(),
            MMDB_EXTENSION
        )
    }

    /// File name of the free edition, e.g. `GeoLite2-City.mmdb`.
    pub fn free_file_name(&self) -> String {
        format!(
            "{}-{}.{}",
            FREE_EDITION_PREFIX,
            self.file_stem(),
            MMDB_EXTENSION
        )
    }

    /// Whether a file's `database_type` metadata can answer this kind's lookups.
    pub fn accepts_database_type(&self, database_type: &str) -> bool {
        database_type.contains(self.file_stem())
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Lowercases a database name and replaces `-` with `_`.
pub fn normalize_database_name(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Metadata about a loaded GeoIP database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseMetadata {
    /// File the database was loaded from
    pub path: PathBuf,
    /// `database_type` from the file, e.g. `GeoLite2-City`
    pub database_type: String,
    /// Database build date/version (`build_<epoch>`)
    pub version: String,
}
