//! Maps decoded records onto their output field schema.
//!
//! Attributes the record does not carry take the fill value, the same as a
//! lookup that found nothing.

use serde_json::Value;

use super::fields::FieldSet;
use crate::config::REGISTERED_COUNTRY_SUFFIX;
use crate::geoip::{
    AnonymousIpRecord, AsnRecord, CityRecord, ConnectionTypeRecord, DatabaseKind, DomainRecord,
    EnterpriseRecord, GeoMatch, GeoRecord, IspRecord, Place,
};

/// Builds the field set for a successful lookup.
pub fn field_set_for_match(found: &GeoMatch, fill: &Value) -> FieldSet {
    let network = text(found.network.as_deref(), fill);

    match &found.record {
        GeoRecord::AnonymousIp(record) => {
            FieldSet::from_values(DatabaseKind::AnonymousIp, anonymous_ip_values(record, network))
        }
        GeoRecord::Asn(record) => {
            FieldSet::from_values(DatabaseKind::Asn, asn_values(record, network, fill))
        }
        GeoRecord::ConnectionType(record) => FieldSet::from_values(
            DatabaseKind::ConnectionType,
            connection_type_values(record, network, fill),
        ),
        GeoRecord::Domain(record) => {
            FieldSet::from_values(DatabaseKind::Domain, domain_values(record, fill))
        }
        GeoRecord::Isp(record) => {
            FieldSet::from_values(DatabaseKind::Isp, isp_values(record, network, fill))
        }
        GeoRecord::City(record) => {
            FieldSet::from_values(DatabaseKind::City, city_values(record, network, fill))
        }
        GeoRecord::Enterprise(record) => {
            FieldSet::from_values(DatabaseKind::Enterprise, enterprise_values(found, record, fill))
        }
    }
}

fn anonymous_ip_values(record: &AnonymousIpRecord, network: Value) -> Vec<Value> {
    vec![
        Value::Bool(record.is_anonymous),
        Value::Bool(record.is_anonymous_vpn),
        Value::Bool(record.is_hosting_provider),
        Value::Bool(record.is_public_proxy),
        Value::Bool(record.is_residential_proxy),
        Value::Bool(record.is_tor_exit_node),
        network,
    ]
}

fn asn_values(record: &AsnRecord, network: Value, fill: &Value) -> Vec<Value> {
    vec![
        number(record.autonomous_system_number, fill),
        text(record.autonomous_system_organization.as_deref(), fill),
        network,
    ]
}

fn connection_type_values(
    record: &ConnectionTypeRecord,
    network: Value,
    fill: &Value,
) -> Vec<Value> {
    vec![text(record.connection_type.as_deref(), fill), network]
}

fn domain_values(record: &DomainRecord, fill: &Value) -> Vec<Value> {
    vec![text(record.domain.as_deref(), fill)]
}

fn isp_values(record: &IspRecord, network: Value, fill: &Value) -> Vec<Value> {
    vec![
        number(record.autonomous_system_number, fill),
        text(record.autonomous_system_organization.as_deref(), fill),
        text(record.isp.as_deref(), fill),
        text(record.organization.as_deref(), fill),
        network,
    ]
}

fn city_values(record: &CityRecord, network: Value, fill: &Value) -> Vec<Value> {
    let (country, country_code) = city_country(record);
    let region = record.most_specific_subdivision();

    vec![
        text(country.as_deref(), fill),
        text(region.and_then(Place::name), fill),
        text(record.city.name(), fill),
        number(record.location.latitude, fill),
        number(record.location.longitude, fill),
        text(region.and_then(Place::iso_code), fill),
        text(record.postal.code.as_deref(), fill),
        text(country_code.as_deref(), fill),
        network,
    ]
}

fn enterprise_values(found: &GeoMatch, record: &EnterpriseRecord, fill: &Value) -> Vec<Value> {
    let traits = &record.traits;

    vec![
        Value::String(found.ip_address.to_string()),
        text(enterprise_country(&record.country).as_deref(), fill),
        text(record.city.name(), fill),
        text(record.postal.code.as_deref(), fill),
        number(record.location.latitude, fill),
        number(record.location.longitude, fill),
        number(record.location.accuracy_radius, fill),
        number(traits.autonomous_system_number, fill),
        text(traits.autonomous_system_organization.as_deref(), fill),
        text(traits.isp.as_deref(), fill),
        text(traits.organization.as_deref(), fill),
        text(traits.domain.as_deref(), fill),
        text(traits.user_type.as_deref(), fill),
        text(traits.connection_type.as_deref(), fill),
    ]
}

/// Country name and ISO code for a City record.
///
/// When the represented (user) country is unknown but the registered country
/// is known, the registered country is reported with a ` (registered)` suffix.
/// It may not be where the user actually is.
pub fn city_country(record: &CityRecord) -> (Option<String>, Option<String>) {
    match (record.country.name(), record.registered_country.name()) {
        (None, Some(registered)) => (
            Some(format!("{registered}{REGISTERED_COUNTRY_SUFFIX}")),
            record
                .registered_country
                .iso_code()
                .map(|code| format!("{code}{REGISTERED_COUNTRY_SUFFIX}")),
        ),
        (country, _) => (
            country.map(str::to_string),
            record.country.iso_code().map(str::to_string),
        ),
    }
}

/// `Name (ISO)` for an Enterprise record, or whichever half is known.
pub fn enterprise_country(country: &Place) -> Option<String> {
    match (country.name(), country.iso_code()) {
        (Some(name), Some(code)) => Some(format!("{name} ({code})")),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(code)) => Some(code.to_string()),
        (None, None) => None,
    }
}

fn text(value: Option<&str>, fill: &Value) -> Value {
    value.map_or_else(|| fill.clone(), |v| Value::String(v.to_string()))
}

fn number<T: Into<Value>>(value: Option<T>, fill: &Value) -> Value {
    value.map_or_else(|| fill.clone(), Into::into)
}
