// InfluxDB-backed health-data source
use crate::application::health_source::{HealthDataSource, RawReading};
use crate::error::SourceError;
use crate::infrastructure::config::SourceSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

/// Field holding the end of a reading's interval; the point time is its start.
const INTERVAL_END_FIELD: &str = "interval_end";

#[derive(Debug, Clone)]
pub struct InfluxHealthSource {
    client: reqwest::Client,
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    depth_measurement: String,
    temperature_measurement: String,
    lookback_hours: u32,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    columns: Vec<String>,
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxHealthSource {
    pub fn new(settings: SourceSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token,
            database: settings.database,
            retention_policy: settings.retention_policy,
            depth_measurement: settings.depth_measurement,
            temperature_measurement: settings.temperature_measurement,
            lookback_hours: settings.lookback_hours,
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    fn series_query(&self, measurement: &str) -> String {
        format!(
            "SELECT value, \"{}\" FROM \"{}\" WHERE time >= now() - {}h ORDER BY time ASC",
            INTERVAL_END_FIELD, measurement, self.lookback_hours
        )
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse, SourceError> {
        let url = self.build_query_url(query);
        tracing::debug!("Executing health series query: {}", query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if let Some(error) = status_error(status) {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Health series query failed with status {}: {}", status, body);
            return Err(error);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        if let Some(error) = data.results.first().and_then(|r| r.error.as_ref()) {
            return Err(SourceError::InvalidResponse(error.clone()));
        }

        Ok(data)
    }

    async fn query_series(&self, measurement: &str) -> Result<Vec<RawReading>, SourceError> {
        let response = self.execute_query(&self.series_query(measurement)).await?;
        let readings = parse_readings(&response);
        tracing::debug!("Read {} rows from {}", readings.len(), measurement);
        Ok(readings)
    }
}

#[async_trait]
impl HealthDataSource for InfluxHealthSource {
    async fn query_depth_series(&self) -> Result<Vec<RawReading>, SourceError> {
        self.query_series(&self.depth_measurement).await
    }

    async fn query_temperature_series(&self) -> Result<Vec<RawReading>, SourceError> {
        self.query_series(&self.temperature_measurement).await
    }
}

/// Map a non-success HTTP status to the source error it signals.
fn status_error(status: StatusCode) -> Option<SourceError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(SourceError::PermissionDenied);
    }
    if !status.is_success() {
        return Some(SourceError::Unavailable(format!("query failed with status {}", status)));
    }
    None
}

/// Rows without a numeric value are skipped. Unparseable or missing times
/// become `None` so the ingestion adapter can drop and report them.
fn parse_readings(response: &InfluxQLResponse) -> Vec<RawReading> {
    let mut readings = Vec::new();
    let mut skipped = 0usize;

    let Some(series) = response.results.first().and_then(|r| r.series.as_ref()) else {
        return readings;
    };

    for s in series {
        let time_idx = s.columns.iter().position(|c| c == "time").unwrap_or(0);
        let value_idx = s.columns.iter().position(|c| c == "value").unwrap_or(1);
        let end_idx = s.columns.iter().position(|c| c == INTERVAL_END_FIELD);

        for row in &s.values {
            let Some(value) = row.get(value_idx).and_then(|v| v.as_f64()) else {
                skipped += 1;
                continue;
            };
            let start = row.get(time_idx).and_then(parse_time);
            let end = end_idx.and_then(|i| row.get(i)).and_then(parse_time);
            readings.push(RawReading::new(start, end, value));
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows without a numeric value", skipped);
    }

    readings
}

fn parse_time(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
