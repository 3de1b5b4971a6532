// Presentation layer - HTTP routing
pub mod app_state;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_dives, list_temperatures, stream_dive_log};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dives", get(list_dives))
        .route("/temperatures", get(list_temperatures))
        .route("/stream", get(stream_dive_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
