//! Per-route HTTP instrumentation.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::metrics::UNMATCHED_HANDLER;
use crate::state::AppState;

/// Count every request and time it under its route template.
///
/// ```rust,ignore
/// router.layer(middleware::from_fn_with_state(state, track_http_metrics));
/// ```
pub async fn track_http_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let handler = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_HANDLER.to_string());
    let method = request.method().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    state.metrics.observe_http_request(
        &handler,
        &method,
        response.status().as_u16(),
        started.elapsed(),
    );
    response
}
