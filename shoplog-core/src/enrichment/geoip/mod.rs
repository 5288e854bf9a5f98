//! Country lookup for client ids.
//!
//! Client ids are usually IPv4 addresses. Ids that are not IPs resolve to
//! [`CountryLookup::Unknown`]; addresses in IANA special-purpose ranges, and
//! addresses the database has no record for, resolve to
//! [`CountryLookup::Reserved`].

use crate::parse::ClientId;
use ipnet::IpNet;
use maxminddb::PathElement;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};


pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const RESERVED_COUNTRY: &str = "Internet Assigned Numbers Authority";

/// IANA special-purpose blocks. Never present in country databases.
static RESERVED_NETS: Lazy<Vec<IpNet>> = Lazy::new(|| {
    [
        "0.0.0.0/8",
        "10.0.0.0/8",
        "100.64.0.0/10",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "172.16.0.0/12",
        "192.0.0.0/24",
        "192.0.2.0/24",
        "192.168.0.0/16",
        "198.18.0.0/15",
        "198.51.100.0/24",
        "203.0.113.0/24",
        "224.0.0.0/4",
        "240.0.0.0/4",
        "::/128",
        "::1/128",
        "fc00::/7",
        "fe80::/10",
        "ff00::/8",
        "2001:db8::/32",
    ]
    .iter()
    .filter_map(|net| net.parse().ok())
    .collect()
});

#[derive(Debug, Error)]
pub enum GeoipError {
    #[error("failed to open country database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: maxminddb::MaxMindDbError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CountryLookup {
    Named(String),
    Unknown,
    Reserved,
}

impl CountryLookup {
    pub fn name(&self) -> &str {
        match self {
            CountryLookup::Named(name) => name,
            CountryLookup::Unknown => UNKNOWN_COUNTRY,
            CountryLookup::Reserved => RESERVED_COUNTRY,
        }
    }
}

impl fmt::Display for CountryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCountry {
    pub client_id: ClientId,
    pub country: CountryLookup,
}

pub fn is_reserved(ip: &IpAddr) -> bool {
    RESERVED_NETS.iter().any(|net| net.contains(ip))
}

/// Lookups that need no database: non-IP ids and reserved ranges.
pub fn classify_without_db(client_id: &ClientId) -> Result<IpAddr, CountryLookup> {
    let Ok(ip) = client_id.as_str().parse::<IpAddr>() else {
        return Err(CountryLookup::Unknown);
    };

    if is_reserved(&ip) {
        return Err(CountryLookup::Reserved);
    }

    Ok(ip)
}

pub struct CountryResolver {
    reader: maxminddb::Reader<maxminddb::Mmap>,
}

impl CountryResolver {
    pub fn open(path: &Path) -> Result<Self, GeoipError> {
        // SAFETY: the database file is opened read-only and must not be
        // modified while mapped.
        let reader = unsafe { maxminddb::Reader::open_mmap(path) }.map_err(|source| {
            GeoipError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!(path = %path.display(), "opened country database");
        Ok(Self { reader })
    }

    pub fn resolve(&self, client_id: &ClientId) -> CountryLookup {
        let ip = match classify_without_db(client_id) {
            Ok(ip) => ip,
            Err(lookup) => return lookup,
        };

        let Some(lookup) = self.reader.lookup(ip).ok() else {
            debug!(client = %client_id, "country lookup failed");
            return CountryLookup::Unknown;
        };

        if !lookup.has_data() {
            return CountryLookup::Reserved;
        }

        lookup
            .decode_path::<String>(&[
                PathElement::Key("country"),
                PathElement::Key("names"),
                PathElement::Key("en"),
            ])
            .ok()
            .flatten()
            .map_or(CountryLookup::Unknown, CountryLookup::Named)
    }

    /// One entry per client, in the given order.
    pub fn resolve_all(&self, clients: &[ClientId]) -> Vec<ClientCountry> {
        clients
            .iter()
            .map(|client_id| ClientCountry {
                client_id: client_id.clone(),
                country: self.resolve(client_id),
            })
            .collect()
    }
}
