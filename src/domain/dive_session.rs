// Dive session domain model and derived statistics
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// One depth reading attributed to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiveEntry {
    pub time: DateTime<Utc>,
    pub depth_meters: f64,
}

impl DiveEntry {
    pub fn new(time: DateTime<Utc>, depth_meters: f64) -> Self {
        Self { time, depth_meters }
    }
}

/// A finalized dive session.
///
/// Fields are private so a session cannot change after the segmenter closes
/// it. Statistics are computed from the entries on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveSession {
    start_time: DateTime<Utc>,
    entries: Vec<DiveEntry>,
}

impl DiveSession {
    /// Build a session from already-ordered entries.
    ///
    /// Returns `None` when `entries` is empty or not in non-decreasing time
    /// order.
    pub fn from_entries(entries: Vec<DiveEntry>) -> Option<Self> {
        let start_time = entries.first()?.time;
        let ordered = entries.windows(2).all(|w| w[0].time <= w[1].time);
        if !ordered {
            return None;
        }
        Some(Self { start_time, entries })
    }

    /// Caller guarantees a non-empty, ordered entry list whose first time is
    /// `start_time`.
    pub(crate) fn finalized(start_time: DateTime<Utc>, entries: Vec<DiveEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert_eq!(entries.first().map(|e| e.time), Some(start_time));
        Self { start_time, entries }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn entries(&self) -> &[DiveEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Time of the last entry, or the start time if there is only one.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.entries
            .last()
            .map(|e| e.time)
            .unwrap_or(self.start_time)
    }

    /// Deepest reading in the session, 0.0 when there are no entries.
    pub fn max_depth(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.depth_meters)
            .fold(None, |max: Option<f64>, d| Some(max.map_or(d, |m| m.max(d))))
            .unwrap_or(0.0)
    }

    /// Elapsed time from the start to the last entry.
    ///
    /// Zero for sessions with fewer than two entries.
    pub fn duration(&self) -> TimeDelta {
        if self.entries.len() < 2 {
            return TimeDelta::zero();
        }
        self.end_time() - self.start_time
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 1000.0
    }
}

/// Reorder sessions newest first.
pub fn most_recent_first(mut sessions: Vec<DiveSession>) -> Vec<DiveSession> {
    sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sessions
}

/// Keep sessions whose start time falls within `[from, to]`.
pub fn sessions_within(
    sessions: &[DiveSession],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<DiveSession> {
    sessions
        .iter()
        .filter(|s| s.start_time >= from && s.start_time <= to)
        .cloned()
        .collect()
}
