//! Configuration constants.
//!
//! Defaults for the command options and the naming rules for database files
//! and generated fields.

/// Default name of the event field holding the address to resolve.
pub const DEFAULT_IP_FIELD: &str = "ip";

/// Database queried when no database names are given.
pub const DEFAULT_DATABASE: &str = "city";

/// Requested-database token that selects every supported database.
pub const ALL_DATABASES: &str = "all";

/// Environment variable overriding the database directory.
pub const DATABASES_DIR_ENV: &str = "GEOIP_DATABASES_DIR";

/// Database directory relative to the parent of the executable's directory.
///
/// The command ships as `<app>/bin/geoip` with databases under
/// `<app>/data/databases`.
pub const DEFAULT_DATABASES_DIR: &str = "data/databases";

/// File-name prefix of the commercial (paid) database editions.
pub const PAID_EDITION_PREFIX: &str = "GeoIP2";

/// File-name prefix of the free database editions.
pub const FREE_EDITION_PREFIX: &str = "GeoLite2";

/// Extension of MaxMind DB files.
pub const MMDB_EXTENSION: &str = "mmdb";

/// Suffix appended to the registered country when it stands in for an
/// unknown represented country.
pub const REGISTERED_COUNTRY_SUFFIX: &str = " (registered)";

/// Valid event field names (also applied to the generated-field prefix).
pub const FIELD_NAME_PATTERN: &str = r"^[_.a-zA-Z-][_.a-zA-Z0-9-]*$";
