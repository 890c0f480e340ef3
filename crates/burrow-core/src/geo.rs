use async_trait::async_trait;

/// Result of a geolocation lookup. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoInfo {
    /// ISO 3166-1 alpha-2 country code (e.g. "US").
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// Resolves a client IP to a coarse location.
///
/// Lookups happen outside the store, before a click is recorded. A failed
/// lookup returns `None` and must never fail the request.
#[async_trait]
pub trait GeoLocator: Send + Sync + 'static {
    async fn locate(&self, ip: &str) -> Option<GeoInfo>;

    /// Provider name, for logs.
    fn name(&self) -> &'static str;
}

/// A locator that knows nothing; every click lands in "Unknown".
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownLocator;

#[async_trait]
impl GeoLocator for UnknownLocator {
    async fn locate(&self, _ip: &str) -> Option<GeoInfo> {
        None
    }

    fn name(&self) -> &'static str {
        "unknown"
    }
}
