// Application state for HTTP handlers
use crate::application::dive_log_service::DiveLogService;
use crate::application::streaming_service::StreamingDiveLogService;

#[derive(Clone)]
pub struct AppState {
    pub dive_log_service: DiveLogService,
    pub streaming_service: StreamingDiveLogService,
}
