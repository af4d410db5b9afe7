//! Output field schemas and field sets.

use serde_json::Value;

use super::Event;
use crate::geoip::DatabaseKind;

const ANONYMOUS_IP_FIELDS: &[&str] = &[
    "is_anonymous",
    "is_anonymous_vpn",
    "is_hosting_provider",
    "is_public_proxy",
    "is_residential_proxy",
    "is_tor_exit_node",
    "network",
];

const ASN_FIELDS: &[&str] = &[
    "autonomous_system_number",
    "autonomous_system_organization",
    "network",
];

const CONNECTION_TYPE_FIELDS: &[&str] = &["connection_type", "network"];

const DOMAIN_FIELDS: &[&str] = &["domain"];

const ISP_FIELDS: &[&str] = &[
    "autonomous_system_number",
    "autonomous_system_organization",
    "isp",
    "organization",
    "network",
];

const CITY_FIELDS: &[&str] = &[
    "Country",
    "Region",
    "City",
    "lat",
    "lon",
    "Region.code",
    "Postal.code",
    "Country.code",
    "network",
];

const ENTERPRISE_FIELDS: &[&str] = &[
    "ip_address",
    "country",
    "city",
    "postal_code",
    "latitude",
    "longitude",
    "accuracy_radius",
    "autonomous_system_number",
    "autonomous_system_organization",
    "isp",
    "organization",
    "domain",
    "user_type",
    "connection_type",
];

/// Unprefixed names of the fields a database kind adds, in output order.
pub fn schema(kind: DatabaseKind) -> &'static [&'static str] {
    match kind {
        DatabaseKind::AnonymousIp => ANONYMOUS_IP_FIELDS,
        DatabaseKind::Asn => ASN_FIELDS,
        DatabaseKind::City => CITY_FIELDS,
        DatabaseKind::ConnectionType => CONNECTION_TYPE_FIELDS,
        DatabaseKind::Domain => DOMAIN_FIELDS,
        DatabaseKind::Enterprise => ENTERPRISE_FIELDS,
        DatabaseKind::Isp => ISP_FIELDS,
    }
}

/// Name of a generated field: `prefix` followed by `base`.
pub fn compose_field_name(prefix: Option<&str>, base: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{base}"),
        None => base.to_string(),
    }
}

/// The fields one database kind produced for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    kind: DatabaseKind,
    fields: Vec<(String, Value)>,
}

impl FieldSet {
    /// Pairs `values` with the kind's schema names.
    pub(crate) fn from_values(kind: DatabaseKind, values: Vec<Value>) -> Self {
        let names = schema(kind);
        debug_assert_eq!(names.len(), values.len(), "{kind} field count");

        let fields = names
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Self { kind, fields }
    }

    /// Every schema field set to `fill`.
    pub fn filled(kind: DatabaseKind, fill: &Value) -> Self {
        Self::from_values(kind, vec![fill.clone(); schema(kind).len()])
    }

    /// Prepends `prefix` to every field name.
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        if prefix.is_some() {
            for (name, _) in &mut self.fields {
                *name = compose_field_name(prefix, name);
            }
        }
        self
    }

    /// Writes every field into `event`; existing fields of the same name are
    /// overwritten in place.
    pub fn merge_into(self, event: &mut Event) {
        for (name, value) in self.fields {
            event.insert(name, value);
        }
    }

    /// Database the fields come from.
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
