//! geoip_enrich library: GeoIP enrichment of event streams
//!
//! This library looks up an IP address field of each event in one or more
//! MaxMind GeoIP2/GeoLite2 databases and adds the resolved attributes
//! (location, network owner, connection type, anonymity flags, ...) as new
//! fields of the event.
//!
//! # Example
//!
//! ```no_run
//! use geoip_enrich::{run_enrichment, Config};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     databases: vec!["city".to_string(), "asn".to_string()],
//!     input: PathBuf::from("events.jsonl"),
//!     prefix: Some("src_".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_enrichment(config)?;
//! println!("Enriched {} events using {} databases", report.events, report.databases.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod enrich;
mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod stream;

// Re-export public API
pub use config::{Config, EventFormat, LogFormat, LogLevel};
pub use enrich::{EnrichOptions, Enricher, Event};
pub use error_handling::{
    ConfigValidationError, EnrichmentStats, GeoIpError, InitializationError, LookupStatus,
    SetupWarning,
};
pub use geoip::{load_databases, DatabaseKind, GeoDatabase, GeoDatabases};
pub use run::{run_enrichment, EnrichReport};

// Internal run module (contains the command's top-level flow)
mod run {
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;
    use strum::IntoEnumIterator;

    use crate::config::{Config, EventFormat};
    use crate::enrich::{EnrichOptions, Enricher};
    use crate::error_handling::{EnrichmentStats, LookupStatus, SetupWarning};
    use crate::geoip::{load_databases, DatabaseKind};
    use crate::initialization::resolve_databases_dir;
    use crate::stream::{
        csv_columns, enrich_stream, open_input, open_output, CsvEventReader, CsvEventWriter,
        JsonLinesReader, JsonLinesWriter,
    };

    /// Results of an enrichment run.
    #[derive(Debug, Clone)]
    pub struct EnrichReport {
        /// Number of events enriched and written
        pub events: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Databases that were loaded, in merge order
        pub databases: Vec<DatabaseKind>,
        /// Non-fatal setup conditions (unknown names, missing files)
        pub warnings: Vec<SetupWarning>,
        /// Lookup outcome counts per database
        pub stats: EnrichmentStats,
    }

    /// Runs the enrichment command with the provided configuration.
    ///
    /// Databases are loaded before the input is opened, so a setup failure
    /// produces no output at all. Events are then read, enriched and written
    /// one at a time until the input ends.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - An option value is invalid
    /// - A database file exists but cannot be opened, or no database loads
    /// - The input cannot be read or an event is malformed
    /// - An event lacks the IP field
    /// - The output cannot be written
    pub fn run_enrichment(config: Config) -> Result<EnrichReport> {
        config.validate().context("Invalid configuration")?;

        let dir = resolve_databases_dir(config.databases_dir.as_deref());
        info!("Loading databases from {}", dir.display());

        let setup = load_databases(&config.requested_databases(), &dir)?;
        let warnings = setup.warnings;
        let mut enricher = Enricher::new(setup.databases, EnrichOptions::from(&config));
        let databases = enricher.database_kinds();

        let start_time = Instant::now();
        let input = open_input(&config.input)?;
        let output = open_output(config.output.as_deref())?;

        let events = match config.format {
            EventFormat::Jsonl => {
                let mut writer = JsonLinesWriter::new(output);
                enrich_stream(&mut enricher, JsonLinesReader::new(input), &mut writer)?
            }
            EventFormat::Csv => {
                let reader = CsvEventReader::new(input)?;
                let columns = csv_columns(reader.headers(), &enricher.output_fields());
                let mut writer = CsvEventWriter::new(output, columns)?;
                enrich_stream(&mut enricher, reader, &mut writer)?
            }
        };

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        let stats = enricher.stats().clone();
        log_summary(events, elapsed_seconds, &databases, &stats);

        Ok(EnrichReport {
            events,
            elapsed_seconds,
            databases,
            warnings,
            stats,
        })
    }

    fn log_summary(
        events: usize,
        elapsed_seconds: f64,
        databases: &[DatabaseKind],
        stats: &EnrichmentStats,
    ) {
        info!("Enriched {} events in {:.2}s", events, elapsed_seconds);
        for kind in databases {
            let counts: Vec<String> = LookupStatus::iter()
                .map(|status| format!("{}={}", status, stats.get_count(*kind, status)))
                .collect();
            info!("  {}: {}", kind, counts.join(", "));
        }
    }
}
