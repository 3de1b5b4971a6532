// Depth and temperature sample domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthSample {
    pub interval_start: DateTime<Utc>,
    pub interval_end: DateTime<Utc>,
    pub depth_meters: f64,
}

impl DepthSample {
    pub fn new(
        interval_start: DateTime<Utc>,
        interval_end: DateTime<Utc>,
        depth_meters: f64,
    ) -> Self {
        Self {
            interval_start,
            interval_end,
            depth_meters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureSample {
    pub interval_start: DateTime<Utc>,
    pub interval_end: DateTime<Utc>,
    pub celsius: f64,
}

impl TemperatureSample {
    pub fn new(interval_start: DateTime<Utc>, interval_end: DateTime<Utc>, celsius: f64) -> Self {
        Self {
            interval_start,
            interval_end,
            celsius,
        }
    }
}

/// Keep temperature samples whose interval starts within `[from, to]`.
///
/// This is a date filter only. It never pairs temperatures with dive
/// sessions: the two series share no join key.
pub fn temperatures_within(
    samples: &[TemperatureSample],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<TemperatureSample> {
    samples
        .iter()
        .filter(|s| s.interval_start >= from && s.interval_start <= to)
        .cloned()
        .collect()
}
