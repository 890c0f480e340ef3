use crate::error::Result;
use crate::record::{Location, UrlRecord};
use std::num::NonZeroU32;
use typed_builder::TypedBuilder;

/// Parameters for allocating a short code.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AllocateRequest {
    /// The target URL. Callers validate it before allocating.
    #[builder(setter(into))]
    pub url: String,
    /// How long the code stays live, in minutes. Falls back to the store default.
    #[builder(default, setter(strip_option))]
    pub validity: Option<NonZeroU32>,
    /// A caller-chosen code. A random one is generated when absent.
    #[builder(default, setter(strip_option, into))]
    pub shortcode: Option<String>,
}

/// Request metadata captured for a single redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickData {
    pub referrer: String,
    pub ip: String,
    pub user_agent: String,
    /// Already resolved by the caller; the store never geolocates.
    pub location: Location,
}

/// What happened to a click handed to [`ShortcodeStore::record_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Recorded,
    /// The code was absent or expired; the click was dropped.
    Ignored,
}

/// The single source of truth for short code → record mappings.
///
/// All operations are synchronous and in-memory. Expired records are
/// indistinguishable from absent ones: any lookup that finds one evicts it.
pub trait ShortcodeStore: Send + Sync + 'static {
    /// Allocates a short code for `request.url` and returns the stored record.
    ///
    /// Fails with `InvalidShortCode` for a malformed requested code and
    /// `AlreadyExists` when the requested code belongs to a live record.
    fn allocate(&self, request: AllocateRequest) -> Result<UrlRecord>;

    /// Returns a copy of the live record for `code`, or `NotFound`.
    fn resolve(&self, code: &str) -> Result<UrlRecord>;

    /// Appends a click to the live record for `code`.
    ///
    /// Never fails; a missing or expired code yields [`ClickOutcome::Ignored`].
    fn record_click(&self, code: &str, click: ClickData) -> ClickOutcome;

    /// Every stored record, including expired ones that have not been
    /// evicted yet. Do not use this to audit uniqueness; see `list_live`.
    fn list_all(&self) -> Vec<UrlRecord>;

    /// Only the records that are live right now.
    fn list_live(&self) -> Vec<UrlRecord>;

    /// Evicts every expired record and returns how many were removed.
    fn purge_expired(&self) -> usize;
}
