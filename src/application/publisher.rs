// Result publisher - Runs both pipelines and delivers their results independently
use crate::application::dive_log_service::DiveLogService;
use crate::application::ingestion::SourceOutcome;
use crate::domain::dive_session::DiveSession;
use crate::domain::sample::TemperatureSample;
use crate::error::DiveLogError;
use tokio::sync::oneshot;

pub type SessionsResult = Result<SourceOutcome<DiveSession>, DiveLogError>;
pub type TemperaturesResult = SourceOutcome<TemperatureSample>;

/// One receiver per pipeline.
///
/// The two results arrive in whatever order their pipelines finish, and the
/// temperature list carries no positional relationship to the session list.
pub struct DiveLogChannels {
    pub sessions: oneshot::Receiver<SessionsResult>,
    pub temperatures: oneshot::Receiver<TemperaturesResult>,
}

/// Spawn the depth and temperature pipelines as separate tasks.
///
/// Each result is sent once, complete. Dropping a receiver only discards that
/// pipeline's result.
pub fn publish(service: &DiveLogService) -> DiveLogChannels {
    let (sessions_tx, sessions_rx) = oneshot::channel();
    let (temperatures_tx, temperatures_rx) = oneshot::channel();

    let depth_service = service.clone();
    tokio::spawn(async move {
        let result = depth_service.reconstruct_dive_sessions().await;
        if sessions_tx.send(result).is_err() {
            tracing::debug!("Dive session receiver dropped before delivery");
        }
    });

    let temperature_service = service.clone();
    tokio::spawn(async move {
        let result = temperature_service.collect_temperatures().await;
        if temperatures_tx.send(result).is_err() {
            tracing::debug!("Temperature receiver dropped before delivery");
        }
    });

    DiveLogChannels {
        sessions: sessions_rx,
        temperatures: temperatures_rx,
    }
}
