//! GeoIP lookups using MaxMind GeoIP2/GeoLite2 databases.
//!
//! This module selects and opens the requested databases from a directory and
//! answers lookups against them. Each open database is bound to exactly one
//! [`DatabaseKind`], which fixes the record type it decodes.

mod init;
mod lookup;
mod metadata;
mod records;
mod types;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::net::IpAddr;

// Re-export public API
pub use init::{
    load_databases, load_databases_with, select_databases, DatabaseSetup, GeoDatabases,
};
pub use lookup::MmdbDatabase;
pub use records::{
    AnonymousIpRecord, AsnRecord, CityRecord, ConnectionTypeRecord, DomainRecord,
    EnterpriseRecord, EnterpriseTraits, GeoMatch, GeoRecord, IspRecord, Location, Place, Postal,
};
pub use types::{normalize_database_name, DatabaseKind, DatabaseMetadata};

use crate::error_handling::GeoIpError;

/// Result of looking up one address in one database.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The address resolved to a record
    Found(GeoMatch),
    /// The address is not covered by the database
    NotFound,
    /// The database cannot answer for this address (e.g. IPv6 in an IPv4 database)
    InvalidInput,
}

/// An open, read-only database bound to one kind.
pub trait GeoDatabase: fmt::Debug {
    /// The kind of records this database answers with.
    fn kind(&self) -> DatabaseKind;

    /// Looks up `ip`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoIpError::Lookup`] when the database is corrupt.
    fn lookup(&self, ip: IpAddr) -> Result<LookupOutcome, GeoIpError>;
}
