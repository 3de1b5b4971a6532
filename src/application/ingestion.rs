// Sample ingestion adapter - Normalizes source readings into domain samples
use crate::application::health_source::{HealthDataSource, RawReading};
use crate::domain::sample::{DepthSample, TemperatureSample};
use crate::error::SourceError;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Result of reading one series from the source.
///
/// `items` is empty whenever `source_error` is set, so callers can tell
/// "no dives" apart from "couldn't read dives".
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome<T> {
    pub items: Vec<T>,
    pub source_error: Option<SourceError>,
}

impl<T> SourceOutcome<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self {
            items,
            source_error: None,
        }
    }

    pub fn failed(error: SourceError) -> Self {
        Self {
            items: Vec::new(),
            source_error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.source_error.is_some()
    }

    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> SourceOutcome<U> {
        SourceOutcome {
            items: f(self.items),
            source_error: self.source_error,
        }
    }
}

#[derive(Clone)]
pub struct SampleIngestion {
    source: Arc<dyn HealthDataSource>,
}

impl SampleIngestion {
    pub fn new(source: Arc<dyn HealthDataSource>) -> Self {
        Self { source }
    }

    pub async fn fetch_depth_samples(&self) -> SourceOutcome<DepthSample> {
        match self.source.query_depth_series().await {
            Ok(readings) => SourceOutcome::ok(normalize("depth", readings, DepthSample::new)),
            Err(e) => {
                tracing::warn!("Depth series query failed: {}", e);
                SourceOutcome::failed(e)
            }
        }
    }

    pub async fn fetch_temperature_samples(&self) -> SourceOutcome<TemperatureSample> {
        match self.source.query_temperature_series().await {
            Ok(readings) => {
                SourceOutcome::ok(normalize("temperature", readings, TemperatureSample::new))
            }
            Err(e) => {
                tracing::warn!("Temperature series query failed: {}", e);
                SourceOutcome::failed(e)
            }
        }
    }
}

/// Convert raw readings, dropping any without both interval bounds.
///
/// Order is preserved; nothing is re-sorted.
fn normalize<T>(
    series: &str,
    readings: Vec<RawReading>,
    build: impl Fn(DateTime<Utc>, DateTime<Utc>, f64) -> T,
) -> Vec<T> {
    let total = readings.len();
    let samples: Vec<T> = readings
        .into_iter()
        .filter_map(|r| match (r.start, r.end) {
            (Some(start), Some(end)) => Some(build(start, end, r.value)),
            _ => None,
        })
        .collect();

    let dropped = total - samples.len();
    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} {} readings with a missing interval bound",
            dropped,
            total,
            series
        );
    }
    tracing::debug!("Normalized {} {} samples", samples.len(), series);

    samples
}
