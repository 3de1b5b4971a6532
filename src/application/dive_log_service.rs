// Dive log service - Use cases for reconstructing dives and collecting temperatures
use crate::application::health_source::HealthDataSource;
use crate::application::ingestion::{SampleIngestion, SourceOutcome};
use crate::application::segmenter::SessionSegmenter;
use crate::application::temperature_collector::TemperatureCollector;
use crate::domain::dive_session::DiveSession;
use crate::domain::sample::TemperatureSample;
use crate::error::DiveLogError;
use std::sync::Arc;

#[derive(Clone)]
pub struct DiveLogService {
    ingestion: SampleIngestion,
    segmenter: SessionSegmenter,
    collector: TemperatureCollector,
}

impl DiveLogService {
    pub fn new(source: Arc<dyn HealthDataSource>, segmenter: SessionSegmenter) -> Self {
        Self {
            ingestion: SampleIngestion::new(source),
            segmenter,
            collector: TemperatureCollector,
        }
    }

    /// Read the depth series and split it into dive sessions, oldest first.
    ///
    /// A source failure is not an error here: it yields no sessions and the
    /// failure is carried in the outcome. Out-of-order depth data is.
    pub async fn reconstruct_dive_sessions(
        &self,
    ) -> Result<SourceOutcome<DiveSession>, DiveLogError> {
        let depths = self.ingestion.fetch_depth_samples().await;
        let sessions = self.segmenter.segment(&depths.items)?;

        tracing::debug!("Reconstructed {} dive sessions", sessions.len());

        Ok(SourceOutcome {
            items: sessions,
            source_error: depths.source_error,
        })
    }

    pub async fn collect_temperatures(&self) -> SourceOutcome<TemperatureSample> {
        let temperatures = self.ingestion.fetch_temperature_samples().await;
        let collector = self.collector;
        temperatures.map_items(|items| collector.collect(items))
    }
}
