use crate::geo::GeoInfo;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Placeholder used for any location field the resolver could not fill.
pub const UNKNOWN: &str = "Unknown";

/// A stored URL record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The key this record is stored under.
    pub shortcode: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was allocated.
    pub created_at: Timestamp,
    /// When the record stops resolving. Always later than `created_at`.
    pub expires_at: Timestamp,
    /// Successful redirects, oldest first.
    pub clicks: Vec<ClickRecord>,
}

impl UrlRecord {
    /// A record is expired once `now` is strictly past `expires_at`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.expires_at
    }

    pub fn is_live_at(&self, now: Timestamp) -> bool {
        !self.is_expired_at(now)
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }
}

/// One successful redirect through a short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub timestamp: Timestamp,
    /// Empty when the request carried no referrer.
    pub referrer: String,
    pub ip: String,
    pub user_agent: String,
    pub location: Location,
}

/// Coarse location of a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub city: String,
}

impl Location {
    /// Builds a location from a (possibly failed) geolocation lookup,
    /// defaulting every missing field to `"Unknown"`.
    pub fn from_geo(geo: Option<GeoInfo>) -> Self {
        let geo = geo.unwrap_or_default();
        let or_unknown = |field: Option<String>| {
            field
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            country: or_unknown(geo.country),
            region: or_unknown(geo.region),
            city: or_unknown(geo.city),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_geo(None)
    }
}

/// Renders as `"city, region, country"`.
impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.region, self.country)
    }
}
