// HTTP request handlers
use crate::infrastructure::http_response::json_response;
use crate::infrastructure::json_mapper::{dives_to_view, temperatures_to_view};
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Reconstructed dive sessions, oldest first
pub async fn list_dives(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    match state.dive_log_service.reconstruct_dive_sessions().await {
        Ok(outcome) => match json_response(&dives_to_view(outcome), compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error reconstructing dive sessions: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
    }
}

/// Water temperature samples, in source order
pub async fn list_temperatures(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let outcome = state.dive_log_service.collect_temperatures().await;

    match json_response(&temperatures_to_view(outcome), compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream both pipelines as they complete (progressive loading)
pub async fn stream_dive_log(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);
    let rx = state.streaming_service.stream_dive_log();
    stream_from_receiver(rx, compress).await
}

fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}
