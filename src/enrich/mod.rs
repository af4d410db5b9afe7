//! Per-event enrichment.
//!
//! For each event the configured IP field is looked up in every open database
//! and each database's [`FieldSet`] is merged into the event. Merging follows
//! [`DatabaseKind::PROCESSING_ORDER`], so when two databases produce the same
//! field name (`network`, `autonomous_system_number`, `isp`, ...) the one
//! processed later wins.

mod fields;
mod mapping;

use std::borrow::Cow;
use std::net::IpAddr;

use serde_json::{Map, Value};

pub use fields::{compose_field_name, schema, FieldSet};
pub use mapping::{city_country, enterprise_country, field_set_for_match};

use crate::config::{Config, DEFAULT_IP_FIELD};
use crate::error_handling::{EnrichmentStats, GeoIpError, LookupStatus};
use crate::geoip::{DatabaseKind, GeoDatabases, LookupOutcome};

/// An event: field name → value, in input order.
pub type Event = Map<String, Value>;

/// Per-run enrichment options.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichOptions {
    /// Field holding the address to look up
    pub field: String,
    /// Prepended to every generated field name
    pub prefix: Option<String>,
    /// Value of fields that could not be resolved
    pub fill: Value,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            field: DEFAULT_IP_FIELD.to_string(),
            prefix: None,
            fill: Value::Null,
        }
    }
}

impl From<&Config> for EnrichOptions {
    fn from(config: &Config) -> Self {
        Self {
            field: config.field.clone(),
            prefix: config.prefix().map(str::to_string),
            fill: config.fill_value(),
        }
    }
}

/// Adds database fields to events, one event at a time.
#[derive(Debug)]
pub struct Enricher {
    databases: GeoDatabases,
    options: EnrichOptions,
    stats: EnrichmentStats,
}

impl Enricher {
    /// Creates an enricher over `databases`.
    pub fn new(databases: GeoDatabases, options: EnrichOptions) -> Self {
        Self {
            databases,
            options,
            stats: EnrichmentStats::new(),
        }
    }

    /// Enriches one event and returns it.
    ///
    /// Every open database contributes its full schema: resolved values when
    /// the address is found, the fill value when it is not found or is not a
    /// valid address.
    ///
    /// # Errors
    ///
    /// - [`GeoIpError::MissingIpField`] when the event lacks the IP field
    /// - [`GeoIpError::Lookup`] when a database is corrupt
    pub fn enrich(&mut self, mut event: Event) -> Result<Event, GeoIpError> {
        let ip = {
            let raw = event
                .get(&self.options.field)
                .ok_or_else(|| GeoIpError::MissingIpField(self.options.field.clone()))?;
            let ip = parse_ip_value(raw);
            if ip.is_none() {
                log::warn!("The IP address is invalid: {}", value_text(raw));
            }
            ip
        };

        for field_set in self.field_sets(ip)? {
            field_set
                .with_prefix(self.options.prefix.as_deref())
                .merge_into(&mut event);
        }

        self.stats.increment_events();
        Ok(event)
    }

    /// Unprefixed field sets for `ip`, one per open database, in merge order.
    ///
    /// `None` stands for a value that is not an IP address.
    pub fn field_sets(&mut self, ip: Option<IpAddr>) -> Result<Vec<FieldSet>, GeoIpError> {
        let fill = &self.options.fill;
        let mut field_sets = Vec::with_capacity(self.databases.len());

        for database in self.databases.in_processing_order() {
            let kind = database.kind();
            let outcome = match ip {
                Some(ip) => database.lookup(ip)?,
                None => LookupOutcome::InvalidInput,
            };

            let field_set = match outcome {
                LookupOutcome::Found(found) => {
                    self.stats.increment(kind, LookupStatus::Found);
                    field_set_for_match(&found, fill)
                }
                LookupOutcome::NotFound => {
                    self.stats.increment(kind, LookupStatus::NotFound);
                    FieldSet::filled(kind, fill)
                }
                LookupOutcome::InvalidInput => {
                    if let Some(ip) = ip {
                        log::warn!("The IP address is invalid for the {} database: {}", kind, ip);
                    }
                    self.stats.increment(kind, LookupStatus::InvalidInput);
                    FieldSet::filled(kind, fill)
                }
            };
            field_sets.push(field_set);
        }

        Ok(field_sets)
    }

    /// Every field name this enricher can add, prefixed, in the order they
    /// first appear in an enriched event.
    pub fn output_fields(&self) -> Vec<String> {
        let prefix = self.options.prefix.as_deref();
        let mut names: Vec<String> = Vec::new();
        for kind in self.databases.kinds() {
            for base in schema(kind) {
                let name = compose_field_name(prefix, base);
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Kinds of the open databases, in merge order.
    pub fn database_kinds(&self) -> Vec<DatabaseKind> {
        self.databases.kinds()
    }

    /// Lookup outcome counts so far.
    pub fn stats(&self) -> &EnrichmentStats {
        &self.stats
    }
}

/// Reads an address from an event value.
///
/// Strings are parsed verbatim; numbers and booleans by their text form.
/// `null`, arrays and objects are never addresses.
pub fn parse_ip_value(value: &Value) -> Option<IpAddr> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(_) | Value::Bool(_) => value.to_string().parse().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
