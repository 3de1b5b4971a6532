// Temperature collector - Flat pass-through of the temperature series
use crate::domain::sample::TemperatureSample;

/// Temperature readings are not session-scoped, so collecting them is an
/// order-preserving pass-through with no attribution to dives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureCollector;

impl TemperatureCollector {
    pub fn collect(&self, samples: Vec<TemperatureSample>) -> Vec<TemperatureSample> {
        tracing::debug!("Collected {} temperature samples", samples.len());
        samples
    }
}
