//! Error type definitions.
//!
//! This module defines the fatal errors, setup warnings, and lookup outcome
//! types used throughout the command.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use maxminddb::MaxMindDbError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::geoip::DatabaseKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// An option value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

/// Fatal errors. Any of these stops the run; events already written stay written.
#[derive(Error, Debug)]
pub enum GeoIpError {
    /// A database file exists but could not be read.
    #[error("There was an issue with the \"{}\" database.", .path.display())]
    DatabaseRead {
        /// Path of the database file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A database file was read but is not a valid MaxMind DB.
    #[error("There was an issue with the \"{}\" database.", .path.display())]
    DatabaseOpen {
        /// Path of the database file
        path: PathBuf,
        /// Underlying reader error
        source: MaxMindDbError,
    },

    /// A database file holds a different kind of data than its name says.
    #[error(
        "There was an issue with the \"{}\" database: \
         it contains '{found}' data, not {expected} data.",
        .path.display()
    )]
    DatabaseKindMismatch {
        /// Path of the database file
        path: PathBuf,
        /// Kind implied by the file name
        expected: DatabaseKind,
        /// `database_type` from the file metadata
        found: String,
    },

    /// None of the requested databases could be found.
    #[error("No databases were loaded.")]
    NoDatabasesLoaded,

    /// An event does not carry the configured IP field.
    #[error("Invalid option value. The '{0}' field could not be found.")]
    MissingIpField(String),

    /// A located record could not be decoded (corrupt data section).
    #[error("Lookup in the {kind} database failed.")]
    Lookup {
        /// Database that failed
        kind: DatabaseKind,
        /// Underlying reader error
        source: MaxMindDbError,
    },
}

/// Non-fatal conditions found while selecting and opening databases.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupWarning {
    /// A requested name matches no supported database.
    #[error("'{0}' is not a valid GeoIP2 database.")]
    UnknownDatabase(String),

    /// Neither the paid nor the free file exists for a requested database.
    #[error("No '{kind}' database could be found in '{}'.", .dir.display())]
    DatabaseNotFound {
        /// Database that is unavailable
        kind: DatabaseKind,
        /// Directory that was searched
        dir: PathBuf,
    },
}

/// Outcome of a single lookup in one database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupStatus {
    /// The address resolved to a record
    Found,
    /// The address is not in the database (expected, filled)
    NotFound,
    /// The field value is not an IP address (logged, filled)
    InvalidInput,
}

impl LookupStatus {
    /// Returns a human-readable string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStatus::Found => "found",
            LookupStatus::NotFound => "not found",
            LookupStatus::InvalidInput => "invalid input",
        }
    }
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
