use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, get_url_stats_handler, health_handler, method_not_allowed_handler,
    not_found_handler, redirect_handler,
};
use crate::middleware::log_requests;
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorturls", post(create_url_handler))
            .route("/shorturls/{shortcode}", get(get_url_stats_handler))
            .route("/{shortcode}", get(redirect_handler))
            .fallback(not_found_handler)
            .method_not_allowed_fallback(method_not_allowed_handler)
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                log_requests,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }
}
