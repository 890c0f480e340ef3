use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

const PACKAGE: &str = "middleware";

/// Emits a start and a completion event for every request.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    state
        .events()
        .info(PACKAGE, format!("{method} {path} - Request started"));

    let response = next.run(request).await;

    state.events().info(
        PACKAGE,
        format!(
            "{method} {path} - {} - {}ms",
            response.status().as_u16(),
            started.elapsed().as_millis()
        ),
    );

    response
}
