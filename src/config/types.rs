//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{Parser, ValueEnum};
use regex::Regex;
use serde_json::Value;

use crate::config::constants::{
    DATABASES_DIR_ENV, DEFAULT_DATABASE, DEFAULT_IP_FIELD, FIELD_NAME_PATTERN,
};
use crate::error_handling::ConfigValidationError;

static FIELD_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIELD_NAME_PATTERN).expect("field name pattern is a valid regex"));

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Encoding of the event stream on input and output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    /// One JSON object per line
    Jsonl,
    /// Comma-separated values with a header row
    Csv,
}

/// Command options.
///
/// Parsed from the command line by `clap`, or built programmatically by
/// library callers starting from [`Config::default`].
///
/// # Examples
///
/// ```bash
/// # City lookups on the `ip` field (defaults)
/// geoip < events.jsonl
///
/// # ASN and ISP lookups on `src_ip`, generated fields prefixed with `src.`
/// geoip asn isp --field src_ip --prefix src. < events.jsonl
///
/// # Every available database, unresolved fields set to "unknown"
/// geoip all --fillnull unknown --format csv --input events.csv
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geoip",
    about = "Adds GeoIP2 location and network fields to events containing an IP address."
)]
pub struct Config {
    /// Databases to query: anonymous_ip, asn, city, connection_type, domain,
    /// enterprise, isp, or all (default: city)
    #[arg(value_name = "DATABASE")]
    pub databases: Vec<String>,

    /// Field containing the IPv4 or IPv6 address to look up
    #[arg(long, default_value = DEFAULT_IP_FIELD)]
    pub field: String,

    /// String prepended to every added field name (e.g. `ip.` gives `ip.isp`)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Value for fields that could not be resolved (default: null)
    #[arg(long)]
    pub fillnull: Option<String>,

    /// Directory holding GeoIP2-*.mmdb / GeoLite2-*.mmdb files
    ///
    /// Defaults to `data/databases` next to the directory of the executable.
    #[arg(long, value_parser, env = DATABASES_DIR_ENV)]
    pub databases_dir: Option<PathBuf>,

    /// File to read events from (`-` reads stdin)
    #[arg(long, value_parser, default_value = "-")]
    pub input: PathBuf,

    /// File to write events to (default: stdout)
    #[arg(long, value_parser)]
    pub output: Option<PathBuf>,

    /// Event encoding: jsonl|csv
    #[arg(long, value_enum, default_value_t = EventFormat::Jsonl)]
    pub format: EventFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            databases: Vec::new(),
            field: DEFAULT_IP_FIELD.to_string(),
            prefix: None,
            fillnull: None,
            databases_dir: None,
            input: PathBuf::from("-"),
            output: None,
            format: EventFormat::Jsonl,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Validates option values that `clap` cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the offending option when
    /// `field` or `prefix` is not a valid field name.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !FIELD_NAME_RE.is_match(&self.field) {
            return Err(ConfigValidationError {
                field: "field",
                message: format!(
                    "'{}' is not a valid field name; expected letters, digits, '_', '.' or '-', \
                     not starting with a digit",
                    self.field
                ),
            });
        }

        if let Some(prefix) = self.prefix() {
            if !FIELD_NAME_RE.is_match(prefix) {
                return Err(ConfigValidationError {
                    field: "prefix",
                    message: format!(
                        "'{}' is not a valid field name prefix; expected letters, digits, '_', \
                         '.' or '-', not starting with a digit",
                        prefix
                    ),
                });
            }
        }

        Ok(())
    }

    /// Requested database names, defaulting to `city` when none were given.
    pub fn requested_databases(&self) -> Vec<String> {
        if self.databases.is_empty() {
            vec![DEFAULT_DATABASE.to_string()]
        } else {
            self.databases.clone()
        }
    }

    /// The generated-field prefix; an empty prefix counts as none.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// The value written to unresolved fields.
    pub fn fill_value(&self) -> Value {
        self.fillnull
            .as_ref()
            .map_or(Value::Null, |fill| Value::String(fill.clone()))
    }
}
