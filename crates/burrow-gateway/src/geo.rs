//! GeoLite2-backed geolocation.

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use burrow_core::{GeoInfo, GeoLocator};
use maxminddb::geoip2::city::Subdivision;
use maxminddb::Reader;
use tracing::trace;

/// Looks IPs up in a local MaxMind City database.
///
/// Country comes back as its ISO code, region as the code of the first
/// subdivision (e.g. `13` for Tokyo), city as its English name.
#[derive(Clone)]
pub struct MaxMindLocator {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindLocator {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

#[async_trait]
impl GeoLocator for MaxMindLocator {
    async fn locate(&self, ip: &str) -> Option<GeoInfo> {
        let ip_addr: IpAddr = ip.parse().ok()?;

        let result = self.reader.lookup(ip_addr).ok()?;
        let city: maxminddb::geoip2::City = result.decode().ok()??;

        let country = city.country.iso_code.map(String::from);
        let region = region(&city.subdivisions);
        let city_name = city.city.names.english.map(|s| s.to_string());

        trace!(ip, ?country, ?region, city = ?city_name, "maxmind lookup");

        Some(GeoInfo {
            country,
            region,
            city: city_name,
        })
    }

    fn name(&self) -> &'static str {
        "maxmind"
    }
}

/// First subdivision's ISO code, falling back to its English name.
fn region(subdivisions: &[Subdivision<'_>]) -> Option<String> {
    let first = subdivisions.first()?;
    first
        .iso_code
        .or(first.names.english)
        .map(String::from)
}
