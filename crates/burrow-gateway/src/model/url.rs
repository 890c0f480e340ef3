use burrow_core::UrlRecord;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Shown instead of an empty referrer.
const DIRECT: &str = "Direct";

/// Body of `POST /shorturls`.
///
/// Fields are loosely typed so that the handler can answer with the
/// specific validation message instead of a generic decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub validity: Option<serde_json::Value>,
    #[serde(default)]
    pub shortcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub shortcode: String,
    pub short_url: String,
    pub original_url: String,
    pub expires_at: String,
    pub created_at: String,
}

impl CreateUrlResponse {
    pub fn new(record: &UrlRecord, base_url: &str) -> Self {
        Self {
            shortcode: record.shortcode.to_string(),
            short_url: record.shortcode.to_url(base_url),
            original_url: record.original_url.clone(),
            expires_at: iso8601(record.expires_at),
            created_at: iso8601(record.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    pub shortcode: String,
    pub original_url: String,
    pub created_at: String,
    pub expires_at: String,
    pub total_clicks: usize,
    pub clicks: Vec<ClickStat>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickStat {
    pub timestamp: String,
    pub referrer: String,
    /// `"city, region, country"`
    pub location: String,
}

impl From<&UrlRecord> for UrlStatsResponse {
    fn from(record: &UrlRecord) -> Self {
        Self {
            shortcode: record.shortcode.to_string(),
            original_url: record.original_url.clone(),
            created_at: iso8601(record.created_at),
            expires_at: iso8601(record.expires_at),
            total_clicks: record.total_clicks(),
            clicks: record
                .clicks
                .iter()
                .map(|click| ClickStat {
                    timestamp: iso8601(click.timestamp),
                    referrer: if click.referrer.is_empty() {
                        DIRECT.to_string()
                    } else {
                        click.referrer.clone()
                    },
                    location: click.location.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// UTC, millisecond precision, e.g. `2026-01-01T00:00:00.000Z`.
fn iso8601(timestamp: Timestamp) -> String {
    format!("{timestamp:.3}")
}
