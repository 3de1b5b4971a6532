// Session segmenter - Groups depth samples into dive sessions by silence gaps
use crate::domain::dive_session::{DiveEntry, DiveSession};
use crate::domain::sample::DepthSample;
use crate::error::{ConfigError, SegmentError};
use chrono::{DateTime, TimeDelta, Utc};

pub const DEFAULT_GAP_THRESHOLD_SECS: i64 = 60;

/// Splits an ordered depth series wherever the silence between the end of one
/// sample and the start of the next exceeds `gap_threshold`.
#[derive(Debug, Clone, Copy)]
pub struct SessionSegmenter {
    gap_threshold: TimeDelta,
}

impl Default for SessionSegmenter {
    fn default() -> Self {
        Self {
            gap_threshold: TimeDelta::seconds(DEFAULT_GAP_THRESHOLD_SECS),
        }
    }
}

/// Session still accumulating entries. Never leaves this module.
struct OpenSession {
    start_time: DateTime<Utc>,
    entries: Vec<DiveEntry>,
}

impl OpenSession {
    fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            entries: Vec::new(),
        }
    }

    fn finalize(self) -> DiveSession {
        DiveSession::finalized(self.start_time, self.entries)
    }
}

impl SessionSegmenter {
    pub fn new(gap_threshold: TimeDelta) -> Result<Self, ConfigError> {
        if gap_threshold <= TimeDelta::zero() {
            return Err(ConfigError::NonPositiveGapThreshold(
                gap_threshold.num_milliseconds(),
            ));
        }
        Ok(Self { gap_threshold })
    }

    pub fn from_secs(secs: i64) -> Result<Self, ConfigError> {
        Self::new(TimeDelta::seconds(secs))
    }

    pub fn gap_threshold(&self) -> TimeDelta {
        self.gap_threshold
    }

    /// Partition `samples` into sessions, oldest first.
    ///
    /// Every sample lands in exactly one session. A gap equal to the threshold
    /// keeps the session open. The session open when the input runs out is
    /// always emitted.
    pub fn segment(&self, samples: &[DepthSample]) -> Result<Vec<DiveSession>, SegmentError> {
        ensure_sorted(samples)?;

        let mut sessions = Vec::new();
        let mut current: Option<OpenSession> = None;
        let mut last_session_end: Option<DateTime<Utc>> = None;

        for sample in samples {
            // No previous sample means nothing to compare against: always open.
            let surfaced = match last_session_end {
                None => true,
                Some(end) => sample.interval_start - end > self.gap_threshold,
            };

            if surfaced {
                if let Some(done) = current.take() {
                    sessions.push(done.finalize());
                }
            }

            let open = current.get_or_insert_with(|| OpenSession::new(sample.interval_start));

            open.entries.push(DiveEntry::new(sample.interval_start, sample.depth_meters));
            last_session_end = Some(sample.interval_end);
        }

        if let Some(done) = current.take() {
            sessions.push(done.finalize());
        }

        tracing::debug!(
            "Segmented {} depth samples into {} sessions (gap threshold {}s)",
            samples.len(),
            sessions.len(),
            self.gap_threshold.num_seconds()
        );

        Ok(sessions)
    }
}

fn ensure_sorted(samples: &[DepthSample]) -> Result<(), SegmentError> {
    match samples
        .windows(2)
        .position(|w| w[1].interval_start < w[0].interval_start)
    {
        Some(i) => Err(SegmentError::UnsortedInput {
            index: i + 1,
            previous: samples[i].interval_start,
            current: samples[i + 1].interval_start,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_source::at;

    fn sample(start: i64, end: i64, depth: f64) -> DepthSample {
        DepthSample::new(at(start), at(end), depth)
    }

    fn segmenter() -> SessionSegmenter {
        SessionSegmenter::from_secs(60).unwrap()
    }

    fn entry_times(session: &DiveSession) -> Vec<DateTime<Utc>> {
        session.entries().iter().map(|e| e.time).collect()
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        assert!(matches!(
            SessionSegmenter::from_secs(0),
            Err(ConfigError::NonPositiveGapThreshold(0))
        ));
        assert!(matches!(
            SessionSegmenter::from_secs(-5),
            Err(ConfigError::NonPositiveGapThreshold(-5000))
        ));
    }

    #[test]
    fn test_default_threshold_is_sixty_seconds() {
        assert_eq!(SessionSegmenter::default().gap_threshold(), TimeDelta::seconds(60));
    }

    #[test]
    fn test_empty_input() {
        assert!(segmenter().segment(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_sample() {
        let sessions = segmenter().segment(&[sample(42, 43, 7.5)]).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_time(), at(42));
        assert_eq!(sessions[0].duration(), TimeDelta::zero());
        assert_eq!(sessions[0].max_depth(), 7.5);
    }

    #[test]
    fn test_split_on_gap_over_threshold() {
        let samples = [sample(0, 2, 3.0), sample(5, 7, 8.0), sample(70, 72, 2.0)];
        let sessions = segmenter().segment(&samples).unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(entry_times(&sessions[0]), vec![at(0), at(5)]);
        assert_eq!(sessions[0].max_depth(), 8.0);
        assert_eq!(sessions[0].duration(), TimeDelta::seconds(5));

        assert_eq!(entry_times(&sessions[1]), vec![at(70)]);
        assert_eq!(sessions[1].max_depth(), 2.0);
        assert_eq!(sessions[1].duration(), TimeDelta::zero());
    }

    #[test]
    fn test_close_samples_form_one_session() {
        let samples = [sample(0, 1, 4.0), sample(10, 11, 9.0), sample(20, 21, 6.0)];
        let sessions = segmenter().segment(&samples).unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].entry_count(), 3);
        assert_eq!(sessions[0].max_depth(), 9.0);
        assert_eq!(sessions[0].duration(), TimeDelta::seconds(20));
    }

    #[test]
    fn test_gap_equal_to_threshold_stays_open() {
        // 62 - 2 == 60
        let samples = [sample(0, 2, 1.0), sample(62, 63, 2.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        assert_eq!(sessions.len(), 1);

        // 63 - 2 == 61
        let samples = [sample(0, 2, 1.0), sample(63, 64, 2.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_gap_measured_from_previous_sample_end() {
        // Long interval: the next start is far from the previous start but
        // close to its end.
        let samples = [sample(0, 100, 5.0), sample(150, 151, 6.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_overlapping_intervals_stay_together() {
        let samples = [sample(0, 30, 5.0), sample(10, 12, 6.0), sample(11, 40, 7.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].entry_count(), 3);
    }

    #[test]
    fn test_last_session_is_flushed() {
        let samples = [
            sample(0, 1, 1.0),
            sample(200, 201, 2.0),
            sample(400, 401, 3.0),
            sample(405, 406, 4.0),
        ];
        let sessions = segmenter().segment(&samples).unwrap();

        assert_eq!(sessions.len(), 3);
        let last = sessions.last().unwrap();
        assert_eq!(entry_times(last), vec![at(400), at(405)]);
    }

    #[test]
    fn test_output_is_ascending_by_start() {
        let samples = [sample(0, 1, 1.0), sample(100, 101, 2.0), sample(300, 301, 3.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        let starts: Vec<_> = sessions.iter().map(|s| s.start_time()).collect();
        assert_eq!(starts, vec![at(0), at(100), at(300)]);
    }

    #[test]
    fn test_unsorted_input_fails_fast() {
        let samples = [sample(0, 1, 1.0), sample(50, 51, 2.0), sample(20, 21, 3.0)];
        let err = segmenter().segment(&samples).unwrap_err();
        assert_eq!(
            err,
            SegmentError::UnsortedInput {
                index: 2,
                previous: at(50),
                current: at(20),
            }
        );
    }

    #[test]
    fn test_equal_starts_are_sorted() {
        let samples = [sample(10, 11, 1.0), sample(10, 12, 2.0)];
        let sessions = segmenter().segment(&samples).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].entry_count(), 2);
    }

    #[test]
    fn test_partition_and_threshold_over_generated_series() {
        // Deterministic pseudo-random gaps straddling the threshold.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut samples = Vec::new();
        let mut t = 0i64;
        for i in 0..500 {
            let len = (next() % 5) as i64;
            let depth = (next() % 400) as f64 / 10.0;
            samples.push(sample(t, t + len, depth));
            t += len + (next() % 130) as i64;
            if i % 97 == 0 {
                t += 60;
            }
        }

        let threshold = TimeDelta::seconds(60);
        let sessions = SessionSegmenter::new(threshold).unwrap().segment(&samples).unwrap();

        let flattened: Vec<(DateTime<Utc>, f64)> = sessions
            .iter()
            .flat_map(|s| s.entries().iter().map(|e| (e.time, e.depth_meters)))
            .collect();
        let expected: Vec<(DateTime<Utc>, f64)> = samples
            .iter()
            .map(|s| (s.interval_start, s.depth_meters))
            .collect();
        assert_eq!(flattened, expected);

        let mut session_of = Vec::new();
        for (idx, s) in sessions.iter().enumerate() {
            assert_eq!(s.start_time(), s.entries()[0].time);
            session_of.extend(std::iter::repeat(idx).take(s.entry_count()));
        }
        for i in 1..samples.len() {
            let gap = samples[i].interval_start - samples[i - 1].interval_end;
            if gap > threshold {
                assert_ne!(session_of[i], session_of[i - 1]);
            } else {
                assert_eq!(session_of[i], session_of[i - 1]);
            }
        }
    }
}
