// Mapper to convert domain models to JSON views
use crate::application::ingestion::SourceOutcome;
use crate::domain::dive_session::{DiveEntry, DiveSession};
use crate::domain::sample::TemperatureSample;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiveSessionView {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_depth_m: f64,
    pub duration_secs: f64,
    pub entries: Vec<DiveEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DivesView {
    pub sessions: Vec<DiveSessionView>,
    pub source_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperaturesView {
    pub samples: Vec<TemperatureSample>,
    pub source_error: Option<String>,
}

/// One line of the progressive dive log stream.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    DiveSessions(DivesView),
    Temperatures(TemperaturesView),
    Error { pipeline: String, message: String },
    Complete { duration_ms: i64 },
}

pub fn session_to_view(session: &DiveSession) -> DiveSessionView {
    DiveSessionView {
        start_time: session.start_time(),
        end_time: session.end_time(),
        max_depth_m: session.max_depth(),
        duration_secs: session.duration_secs(),
        entries: session.entries().to_vec(),
    }
}

pub fn dives_to_view(outcome: SourceOutcome<DiveSession>) -> DivesView {
    DivesView {
        sessions: outcome.items.iter().map(session_to_view).collect(),
        source_error: outcome.source_error.map(|e| e.to_string()),
    }
}

pub fn temperatures_to_view(outcome: SourceOutcome<TemperatureSample>) -> TemperaturesView {
    TemperaturesView {
        samples: outcome.items,
        source_error: outcome.source_error.map(|e| e.to_string()),
    }
}
