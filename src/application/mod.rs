// Application layer - Use cases and the health-data source capability
pub mod dive_log_service;
pub mod health_source;
pub mod ingestion;
pub mod publisher;
pub mod segmenter;
pub mod streaming_service;
pub mod temperature_collector;

#[cfg(test)]
pub(crate) mod fake_source;
