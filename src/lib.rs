//! Dive session reconstruction.
//!
//! Groups an irregularly sampled underwater-depth series into dive sessions
//! separated by silence gaps, and carries the water-temperature series
//! alongside as an independent result.
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::dive_log_service::DiveLogService;
pub use application::health_source::{HealthDataSource, RawReading};
pub use application::ingestion::SourceOutcome;
pub use application::publisher::{publish, DiveLogChannels};
pub use application::segmenter::SessionSegmenter;
pub use domain::dive_session::{most_recent_first, sessions_within, DiveEntry, DiveSession};
pub use domain::sample::{temperatures_within, DepthSample, TemperatureSample};
pub use error::{ConfigError, DiveLogError, SegmentError, SourceError};
