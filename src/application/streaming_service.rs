// Streaming dive log service - Progressive delivery of both pipelines
use crate::application::dive_log_service::DiveLogService;
use crate::application::publisher::{publish, DiveLogChannels};
use crate::error::DiveLogError;
use crate::infrastructure::json_mapper::{dives_to_view, temperatures_to_view, StreamMessage};
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct StreamingDiveLogService {
    service: DiveLogService,
}

impl StreamingDiveLogService {
    pub fn new(service: DiveLogService) -> Self {
        Self { service }
    }

    /// Messages arrive in pipeline completion order, then a final `Complete`.
    pub fn stream_dive_log(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(8);
        let start_time = Instant::now();

        let DiveLogChannels {
            sessions,
            temperatures,
        } = publish(&self.service);

        let tx_sessions = tx.clone();
        let sessions_task = tokio::spawn(async move {
            let msg = match sessions.await {
                Ok(Ok(outcome)) => StreamMessage::DiveSessions(dives_to_view(outcome)),
                Ok(Err(e)) => StreamMessage::Error {
                    pipeline: "dive_sessions".to_string(),
                    message: e.to_string(),
                },
                Err(e) => StreamMessage::Error {
                    pipeline: "dive_sessions".to_string(),
                    message: DiveLogError::Aborted(e.to_string()).to_string(),
                },
            };
            let _ = tx_sessions.send(msg).await;
        });

        let tx_temperatures = tx.clone();
        let temperatures_task = tokio::spawn(async move {
            let msg = match temperatures.await {
                Ok(outcome) => StreamMessage::Temperatures(temperatures_to_view(outcome)),
                Err(e) => StreamMessage::Error {
                    pipeline: "temperatures".to_string(),
                    message: DiveLogError::Aborted(e.to_string()).to_string(),
                },
            };
            let _ = tx_temperatures.send(msg).await;
        });

        tokio::spawn(async move {
            let _ = sessions_task.await;
            let _ = temperatures_task.await;

            let duration_ms = start_time.elapsed().as_millis() as i64;
            tracing::debug!("Dive log stream completed in {}ms", duration_ms);
            let _ = tx.send(StreamMessage::Complete { duration_ms }).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_source::{reading, FakeSource};
    use crate::application::segmenter::SessionSegmenter;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stream_ends_with_complete() {
        let source = FakeSource {
            depths: vec![reading(0, 1, 5.0), reading(10, 11, 7.0)],
            temperatures: vec![reading(0, 1, 20.0)],
            ..Default::default()
        };
        let service = DiveLogService::new(Arc::new(source), SessionSegmenter::default());
        let mut rx = StreamingDiveLogService::new(service).stream_dive_log();

        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[2], StreamMessage::Complete { .. }));

        let dives = messages.iter().find_map(|m| match m {
            StreamMessage::DiveSessions(view) => Some(view),
            _ => None,
        });
        assert_eq!(dives.unwrap().sessions.len(), 1);
        assert_eq!(dives.unwrap().sessions[0].max_depth_m, 7.0);

        assert!(messages
            .iter()
            .any(|m| matches!(m, StreamMessage::Temperatures(view) if view.samples.len() == 1)));
    }

    #[tokio::test]
    async fn test_unsorted_depths_stream_an_error() {
        let source = FakeSource::with_depths(vec![reading(50, 51, 5.0), reading(0, 1, 7.0)]);
        let service = DiveLogService::new(Arc::new(source), SessionSegmenter::default());
        let mut rx = StreamingDiveLogService::new(service).stream_dive_log();

        let mut saw_error = false;
        while let Some(msg) = rx.recv().await {
            if let StreamMessage::Error { pipeline, .. } = msg {
                assert_eq!(pipeline, "dive_sessions");
                saw_error = true;
            }
        }
        assert!(saw_error);
    }
}
