use crate::error::{AppError, Result};
use crate::handlers::{PACKAGE, ROUTE};
use crate::model::{CreateUrlRequest, CreateUrlResponse, UrlStatsResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use burrow_core::AllocateRequest;
use std::num::NonZeroU32;
use tracing::instrument;

#[instrument(skip_all)]
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let events = state.events();
    events.info(ROUTE, "POST /shorturls route accessed".to_string());
    events.info(PACKAGE, "Received create short URL request".to_string());

    let Json(request) = payload.map_err(|rejection| {
        events.warn(PACKAGE, format!("Malformed request body: {rejection}"));
        AppError::BadRequest(rejection.body_text())
    })?;

    let Some(url) = request.url.filter(|url| !url.is_empty()) else {
        events.warn(PACKAGE, "Missing URL in request".to_string());
        return Err(AppError::BadRequest("URL is required".to_string()));
    };

    if let Err(reason) = validate_url(&url) {
        events.warn(PACKAGE, format!("Invalid URL format: {reason}"));
        return Err(AppError::BadRequest("Invalid URL format".to_string()));
    }

    let Ok(validity) = parse_validity(request.validity.as_ref()) else {
        events.warn(PACKAGE, "Invalid validity period".to_string());
        return Err(AppError::BadRequest(
            "Validity must be a positive integer".to_string(),
        ));
    };

    let allocate = AllocateRequest {
        url,
        validity,
        // an empty shortcode means "generate one"
        shortcode: request.shortcode.filter(|code| !code.is_empty()),
    };

    let record = state.store().allocate(allocate).map_err(|err| {
        events.error(PACKAGE, format!("Error creating short URL: {err}"));
        AppError::from(err)
    })?;

    events.info(PACKAGE, "Short URL created successfully".to_string());
    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse::new(&record, state.base_url())),
    ))
}

#[instrument(skip(state))]
pub async fn get_url_stats_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
) -> Result<Json<UrlStatsResponse>> {
    let events = state.events();
    events.info(ROUTE, format!("GET /shorturls/{shortcode} route accessed"));
    events.info(PACKAGE, format!("Fetching stats for: {shortcode}"));

    let record = state.store().resolve(&shortcode).map_err(|err| {
        events.warn(PACKAGE, format!("URL not found: {shortcode}"));
        AppError::from(err)
    })?;

    events.info(PACKAGE, format!("Stats retrieved for: {shortcode}"));
    Ok(Json(UrlStatsResponse::from(&record)))
}

pub async fn not_found_handler(State(state): State<AppState>, method: Method, uri: Uri) -> AppError {
    state.events().warn(
        ROUTE,
        format!("404 - Route not found: {method} {}", uri.path()),
    );
    AppError::NotFound("Route not found".to_string())
}

pub async fn method_not_allowed_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> AppError {
    state.events().warn(
        ROUTE,
        format!("405 - Method not allowed: {method} {}", uri.path()),
    );
    AppError::MethodNotAllowed("Method not allowed".to_string())
}

/// Accepts absolute `http`/`https` URLs with a host.
fn validate_url(raw: &str) -> std::result::Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme: {}", parsed.scheme()));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }

    Ok(())
}

/// A validity, when present, must be a positive whole number of minutes.
fn parse_validity(value: Option<&serde_json::Value>) -> std::result::Result<Option<NonZeroU32>, ()> {
    let Some(value) = value else {
        return Ok(None);
    };

    let minutes = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    });

    minutes
        .and_then(|m| u32::try_from(m).ok())
        .and_then(NonZeroU32::new)
        .map(Some)
        .ok_or(())
}
