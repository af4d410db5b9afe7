// Shared test helpers: an in-memory database and record builders.
//
// Included with `mod helpers;` by the test files that need it.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use geoip_enrich::geoip::{
    AsnRecord, CityRecord, DatabaseKind, GeoDatabase, GeoDatabases, GeoMatch, GeoRecord,
    IspRecord, LookupOutcome, Place,
};
use geoip_enrich::GeoIpError;

/// Database answering from a fixed table; unknown addresses are not found.
#[derive(Debug, Clone)]
pub struct FakeDatabase {
    kind: DatabaseKind,
    records: HashMap<IpAddr, (String, GeoRecord)>,
    ipv4_only: bool,
}

#[allow(dead_code)] // Used by other test files
impl FakeDatabase {
    pub fn new(kind: DatabaseKind) -> Self {
        Self {
            kind,
            records: HashMap::new(),
            ipv4_only: false,
        }
    }

    pub fn with(mut self, ip: &str, network: &str, record: GeoRecord) -> Self {
        self.records
            .insert(ip.parse().expect("valid test address"), (network.to_string(), record));
        self
    }

    /// Answers IPv6 addresses with `InvalidInput`, like an IPv4 MaxMind tree.
    pub fn ipv4_only(mut self) -> Self {
        self.ipv4_only = true;
        self
    }

    pub fn boxed(self) -> Box<dyn GeoDatabase> {
        Box::new(self)
    }
}

impl GeoDatabase for FakeDatabase {
    fn kind(&self) -> DatabaseKind {
        self.kind
    }

    fn lookup(&self, ip: IpAddr) -> Result<LookupOutcome, GeoIpError> {
        if self.ipv4_only && ip.is_ipv6() {
            return Ok(LookupOutcome::InvalidInput);
        }
        Ok(match self.records.get(&ip) {
            Some((network, record)) => LookupOutcome::Found(GeoMatch {
                ip_address: ip,
                network: Some(network.clone()),
                record: record.clone(),
            }),
            None => LookupOutcome::NotFound,
        })
    }
}

#[allow(dead_code)]
pub fn databases(list: Vec<FakeDatabase>) -> GeoDatabases {
    list.into_iter().map(FakeDatabase::boxed).collect()
}

#[allow(dead_code)]
pub fn place(name: Option<&str>, iso_code: Option<&str>) -> Place {
    let mut names = BTreeMap::new();
    if let Some(name) = name {
        names.insert("en".to_string(), name.to_string());
    }
    Place {
        iso_code: iso_code.map(str::to_string),
        names,
    }
}

/// London, England, as the City database describes 81.2.69.142.
#[allow(dead_code)]
pub fn london() -> GeoRecord {
    let mut record = CityRecord {
        city: place(Some("London"), None),
        country: place(Some("United Kingdom"), Some("GB")),
        registered_country: place(Some("United Kingdom"), Some("GB")),
        subdivisions: vec![place(Some("England"), Some("ENG"))],
        ..Default::default()
    };
    record.location.latitude = Some(51.5142);
    record.location.longitude = Some(-0.0931);
    record.postal.code = Some("EC2V".to_string());
    GeoRecord::City(record)
}

#[allow(dead_code)]
pub fn asn(number: u32, organization: &str) -> GeoRecord {
    GeoRecord::Asn(AsnRecord {
        autonomous_system_number: Some(number),
        autonomous_system_organization: Some(organization.to_string()),
    })
}

#[allow(dead_code)]
pub fn isp(number: u32, name: &str) -> GeoRecord {
    GeoRecord::Isp(IspRecord {
        autonomous_system_number: Some(number),
        autonomous_system_organization: Some(format!("{name} AS")),
        isp: Some(name.to_string()),
        organization: Some(name.to_string()),
    })
}
