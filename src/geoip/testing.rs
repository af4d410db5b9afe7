//! In-memory database used by unit tests.

use std::collections::HashMap;
use std::net::IpAddr;

use super::{DatabaseKind, GeoDatabase, GeoMatch, GeoRecord, LookupOutcome};
use crate::error_handling::GeoIpError;

/// Answers lookups from a fixed address → record table.
#[derive(Debug, Clone)]
pub(crate) struct StaticDatabase {
    kind: DatabaseKind,
    records: HashMap<IpAddr, (String, GeoRecord)>,
    ipv4_only: bool,
}

impl StaticDatabase {
    pub(crate) fn new(kind: DatabaseKind) -> Self {
        Self {
            kind,
            records: HashMap::new(),
            ipv4_only: false,
        }
    }

    pub(crate) fn with_record(mut self, ip: &str, network: &str, record: GeoRecord) -> Self {
        let ip = ip.parse().expect("test address must parse");
        self.records.insert(ip, (network.to_string(), record));
        self
    }

    pub(crate) fn ipv4_only(mut self) -> Self {
        self.ipv4_only = true;
        self
    }
}

impl GeoDatabase for StaticDatabase {
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
