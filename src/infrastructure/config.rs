use crate::application::segmenter::{SessionSegmenter, DEFAULT_GAP_THRESHOLD_SECS};
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub engine: EngineSettings,
    pub source: SourceSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    pub gap_threshold_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub host: String,
    pub token: String,
    pub database: String,
    pub retention_policy: String,
    pub depth_measurement: String,
    pub temperature_measurement: String,
    pub lookback_hours: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl EngineSettings {
    /// Validate the threshold and build the segmenter.
    pub fn segmenter(&self) -> Result<SessionSegmenter, ConfigError> {
        SessionSegmenter::from_secs(self.gap_threshold_secs)
    }
}

/// Load `config/dive` (any format the `config` crate knows), then apply
/// `DIVE__SECTION__KEY` environment overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from("config/dive")
}

pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("engine.gap_threshold_secs", DEFAULT_GAP_THRESHOLD_SECS)?
        .set_default("source.host", "http://localhost:8086")?
        .set_default("source.token", "")?
        .set_default("source.database", "health")?
        .set_default("source.retention_policy", "autogen")?
        .set_default("source.depth_measurement", "underwater_depth")?
        .set_default("source.temperature_measurement", "water_temperature")?
        .set_default("source.lookback_hours", 24 * 30)?
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("DIVE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
