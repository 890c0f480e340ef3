use crate::error::{AppError, Result};
use crate::handlers::{PACKAGE, ROUTE};
use crate::state::AppState;
use axum::extract::{ConnectInfo, FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use burrow_core::{ClickData, ClickOutcome, Location};
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::{info, instrument, warn};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Who is following a short link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// First `X-Forwarded-For` hop, else the peer address, else empty.
    pub ip: String,
    pub referrer: String,
    pub user_agent: String,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let forwarded = header_value(&parts.headers, &X_FORWARDED_FOR)
            .split(',')
            .next()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(String::from);

        let ip = forwarded
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_default();

        Ok(Self {
            ip,
            referrer: header_value(&parts.headers, &header::REFERER).to_string(),
            user_agent: header_value(&parts.headers, &header::USER_AGENT).to_string(),
        })
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Follows a short link: resolves it, records the click, and answers
/// `302 Found`. Click recording never turns a redirect into an error.
#[instrument(skip(state, client))]
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
    client: ClientInfo,
) -> Result<Response> {
    state
        .events()
        .info(ROUTE, format!("GET /{shortcode} redirect route accessed"));
    state
        .events()
        .info(PACKAGE, format!("Redirect request for: {shortcode}"));

    let record = state.store().resolve(&shortcode).map_err(|err| {
        state
            .events()
            .warn(PACKAGE, format!("URL not found for redirect: {shortcode}"));
        AppError::from(err)
    })?;

    let location = Location::from_geo(state.geo().locate(&client.ip).await);
    let click = ClickData {
        referrer: client.referrer,
        ip: client.ip,
        user_agent: client.user_agent,
        location,
    };

    if state.store().record_click(&shortcode, click) == ClickOutcome::Ignored {
        // expired between resolve and record; the redirect still goes out
        warn!(%shortcode, "click dropped");
    }

    state.events().info(
        PACKAGE,
        format!("Redirecting to: {}", record.original_url),
    );
    info!(%shortcode, original_url = %record.original_url, "redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, record.original_url)]).into_response())
}
