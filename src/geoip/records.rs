//! Records decoded from MaxMind databases.
//!
//! Only the attributes the command emits are declared; everything else in a
//! record is skipped by the decoder. Attributes missing from a record decode
//! to `None` (or `false` for the anonymizer flags, matching the GeoIP2 model
//! defaults).

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::Deserialize;

/// Locale whose names are emitted.
const NAME_LOCALE: &str = "en";

/// Localized names keyed by locale code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Place {
    /// ISO 3166 country or subdivision code
    pub iso_code: Option<String>,
    /// Name per locale code (`en`, `de`, ...)
    pub names: BTreeMap<String, String>,
}

impl Place {
    /// English name, if the database has one.
    pub fn name(&self) -> Option<&str> {
        self.names.get(NAME_LOCALE).map(String::as_str)
    }

    /// ISO code, if the database has one.
    pub fn iso_code(&self) -> Option<&str> {
        self.iso_code.as_deref()
    }
}

/// Approximate coordinates of an address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Degrees north
    pub latitude: Option<f64>,
    /// Degrees east
    pub longitude: Option<f64>,
    /// Radius in kilometers around the coordinates
    pub accuracy_radius: Option<u16>,
}

/// Postal area of an address.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Postal {
    /// Postal code, e.g. `EC2V`
    pub code: Option<String>,
}

/// GeoIP2 Anonymous IP record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnonymousIpRecord {
    /// Any of the flags below is set
    pub is_anonymous: bool,
    /// Registered to an anonymous VPN provider
    pub is_anonymous_vpn: bool,
    /// Belongs to a hosting or VPN provider
    pub is_hosting_provider: bool,
    /// Belongs to a public proxy
    pub is_public_proxy: bool,
    /// On a suspected residential proxy network
    pub is_residential_proxy: bool,
    /// A Tor exit node
    pub is_tor_exit_node: bool,
}

/// GeoLite2 ASN record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AsnRecord {
    /// Autonomous system number
    pub autonomous_system_number: Option<u32>,
    /// Organization the autonomous system is registered to
    pub autonomous_system_organization: Option<String>,
}

/// GeoIP2 Connection-Type record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionTypeRecord {
    /// `Dialup`, `Cable/DSL`, `Corporate`, `Cellular` or `Satellite`
    pub connection_type: Option<String>,
}

/// GeoIP2 Domain record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DomainRecord {
    /// Second-level domain, e.g. `example.com`
    pub domain: Option<String>,
}

/// GeoIP2 ISP record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IspRecord {
    /// Autonomous system number
    pub autonomous_system_number: Option<u32>,
    /// Organization the autonomous system is registered to
    pub autonomous_system_organization: Option<String>,
    /// Name of the ISP
    pub isp: Option<String>,
    /// Organization using the address
    pub organization: Option<String>,
}

/// GeoIP2/GeoLite2 City record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CityRecord {
    /// City
    pub city: Place,
    /// Country where the address is located
    pub country: Place,
    /// Country the network is registered in
    pub registered_country: Place,
    /// Coordinates
    pub location: Location,
    /// Postal code
    pub postal: Postal,
    /// Ordered from largest to smallest subdivision.
    pub subdivisions: Vec<Place>,
}

impl CityRecord {
    /// The smallest subdivision the database knows for the address.
    pub fn most_specific_subdivision(&self) -> Option<&Place> {
        self.subdivisions.last()
    }
}

/// Network attributes of an Enterprise record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnterpriseTraits {
    /// Autonomous system number
    pub autonomous_system_number: Option<u32>,
    /// Organization the autonomous system is registered to
    pub autonomous_system_organization: Option<String>,
    /// Same values as [`ConnectionTypeRecord::connection_type`]
    pub connection_type: Option<String>,
    /// Second-level domain
    pub domain: Option<String>,
    /// Name of the ISP
    pub isp: Option<String>,
    /// Organization using the address
    pub organization: Option<String>,
    /// e.g. `business`, `residential`, `cellular`
    pub user_type: Option<String>,
}

/// GeoIP2 Enterprise record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnterpriseRecord {
    /// City
    pub city: Place,
    /// Country where the address is located
    pub country: Place,
    /// Coordinates and accuracy
    pub location: Location,
    /// Postal code
    pub postal: Postal,
    /// Network attributes
    pub traits: EnterpriseTraits,
}

/// A decoded record of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoRecord {
    /// From an Anonymous IP database
    AnonymousIp(AnonymousIpRecord),
    /// From an ASN database
    Asn(AsnRecord),
    /// From a City database
    City(CityRecord),
    /// From a Connection Type database
    ConnectionType(ConnectionTypeRecord),
    /// From a Domain database
    Domain(DomainRecord),
    /// From an Enterprise database
    Enterprise(EnterpriseRecord),
    /// From an ISP database
    Isp(IspRecord),
}

/// A successful lookup: the record plus where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    /// The address that was looked up
    pub ip_address: IpAddr,
    /// CIDR of the network the record applies to, e.g. `81.2.69.128/26`
    pub network: Option<String>,
    /// The decoded record
    pub record: GeoRecord,
}
