// In-memory health-data source for tests
use crate::application::health_source::{HealthDataSource, RawReading};
use crate::error::SourceError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Reading with an interval of `[start, end]` seconds.
pub fn reading(start: i64, end: i64, value: f64) -> RawReading {
    RawReading::new(Some(at(start)), Some(at(end)), value)
}

#[derive(Default)]
pub struct FakeSource {
    pub depths: Vec<RawReading>,
    pub temperatures: Vec<RawReading>,
    pub depth_error: Option<SourceError>,
    pub temperature_error: Option<SourceError>,
}

impl FakeSource {
    pub fn with_depths(depths: Vec<RawReading>) -> Self {
        Self {
            depths,
            ..Default::default()
        }
    }

    pub fn with_temperatures(temperatures: Vec<RawReading>) -> Self {
        Self {
            temperatures,
            ..Default::default()
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            depth_error: Some(error.clone()),
            temperature_error: Some(error),
            ..Default::default()
        }
    }
}

#[async_trait]
impl HealthDataSource for FakeSource {
    async fn query_depth_series(&self) -> Result<Vec<RawReading>, SourceError> {
        match &self.depth_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.depths.clone()),
        }
    }

    async fn query_temperature_series(&self) -> Result<Vec<RawReading>, SourceError> {
        match &self.temperature_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.temperatures.clone()),
        }
    }
}
