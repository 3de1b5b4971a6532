// Error types shared across layers
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures reported by the external health-data source.
///
/// A failed query is never turned into a missing sequence: the pipeline keeps
/// going with an empty one and carries this error alongside it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("permission to read health data was denied")]
    PermissionDenied,

    #[error("health data source returned no data")]
    NoData,

    #[error("health data source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid response from health data source: {0}")]
    InvalidResponse(String),
}

/// Configuration problems, rejected when the engine is constructed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("gap threshold must be positive, got {0} ms")]
    NonPositiveGapThreshold(i64),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised while segmenting a depth series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("depth samples out of order at index {index}: {current} starts before {previous}")]
    UnsortedInput {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
}

/// Service-level error for the dive log use cases.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiveLogError {
    #[error("segmentation failed: {0}")]
    Segment(#[from] SegmentError),

    #[error("pipeline task aborted: {0}")]
    Aborted(String),
}
