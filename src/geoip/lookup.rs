//! IP address lookups against an open MaxMind database.

use std::net::IpAddr;

use maxminddb::Reader;

use super::records::{GeoMatch, GeoRecord};
use super::types::{DatabaseKind, DatabaseMetadata};
use super::{GeoDatabase, LookupOutcome};
use crate::error_handling::GeoIpError;

/// An open MaxMind DB file bound to one database kind.
pub struct MmdbDatabase {
    kind: DatabaseKind,
    reader: Reader<Vec<u8>>,
    metadata: DatabaseMetadata,
}

impl MmdbDatabase {
    pub(crate) fn new(
        kind: DatabaseKind,
        reader: Reader<Vec<u8>>,
        metadata: DatabaseMetadata,
    ) -> Self {
        Self {
            kind,
            reader,
            metadata,
        }
    }
}

impl GeoDatabase for MmdbDatabase {
    fn kind(&self) -> DatabaseKind {
        self.kind
    }

    fn lookup(&self, ip: IpAddr) -> Result<LookupOutcome, GeoIpError> {
        // An IPv4-only tree has no path for IPv6 addresses
        if ip.is_ipv6() && self.reader.metadata.ip_version == 4 {
            return Ok(LookupOutcome::InvalidInput);
        }

        let kind = self.kind;
        let result = self
            .reader
            .lookup(ip)
            .map_err(|source| GeoIpError::Lookup { kind, source })?;

        if !result.has_data() {
            return Ok(LookupOutcome::NotFound);
        }

        let network = result.network().ok().map(|network| network.to_string());

        let record = match kind {
            DatabaseKind::AnonymousIp => result.decode().map(|r| r.map(GeoRecord::AnonymousIp)),
            DatabaseKind::Asn => result.decode().map(|r| r.map(GeoRecord::Asn)),
            DatabaseKind::City => result.decode().map(|r| r.map(GeoRecord::City)),
            DatabaseKind::ConnectionType => {
                result.decode().map(|r| r.map(GeoRecord::ConnectionType))
            }
            DatabaseKind::Domain => result.decode().map(|r| r.map(GeoRecord::Domain)),
            DatabaseKind::Enterprise => result.decode().map(|r| r.map(GeoRecord::Enterprise)),
            DatabaseKind::Isp => result.decode().map(|r| r.map(GeoRecord::Isp)),
        }
        .map_err(|source| GeoIpError::Lookup { kind, source })?;

        Ok(match record {
            Some(record) => LookupOutcome::Found(GeoMatch {
                ip_address: ip,
                network,
                record,
            }),
            None => LookupOutcome::NotFound,
        })
    }
}

impl std::fmt::Debug for MmdbDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} database {} ({})",
            self.kind,
            self.metadata.path.display(),
            self.metadata.version
        )
    }
}
