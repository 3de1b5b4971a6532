// Capability trait for the external health-data source
use crate::error::SourceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A reading as delivered by the source, before normalization.
///
/// Sources are allowed to omit either end of the interval; the ingestion
/// adapter drops such readings.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub value: f64,
}

impl RawReading {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>, value: f64) -> Self {
        Self { start, end, value }
    }
}

#[async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Underwater depth readings in meters, in chronological order
    async fn query_depth_series(&self) -> Result<Vec<RawReading>, SourceError>;

    /// Water temperature readings in degrees Celsius, in chronological order
    async fn query_temperature_series(&self) -> Result<Vec<RawReading>, SourceError>;
}
