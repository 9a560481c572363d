/// Playlist export requests, published to a message queue
use crate::services::cache::redis_error;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use songbook_core::{PlaylistId, Result};
use std::sync::Arc;

/// Message consumed by the export worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub playlist_id: PlaylistId,
    pub target_email: String,
}

/// Publishes messages to a named queue
#[async_trait]
pub trait ExportProducer: Send + Sync {
    async fn send_message(&self, queue: &str, message: &str) -> Result<()>;
}

/// Producer backed by a Redis list; messages are appended with `RPUSH`
pub struct RedisExportProducer {
    connection: ConnectionManager,
}

impl RedisExportProducer {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    /// Connect a producer of its own to Redis at `url`
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(redis_error)?;
        let connection = ConnectionManager::new(client).await.map_err(redis_error)?;
        Ok(Self::new(connection))
    }
}

#[async_trait]
impl ExportProducer for RedisExportProducer {
    async fn send_message(&self, queue: &str, message: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("RPUSH")
            .arg(queue)
            .arg(message)
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;

        tracing::info!("Queued export request on {}", queue);
        Ok(())
    }
}

/// Export requests for one queue
pub struct ExportService {
    producer: Arc<dyn ExportProducer>,
    queue: String,
}

impl ExportService {
    pub fn new(producer: Arc<dyn ExportProducer>, queue: impl Into<String>) -> Self {
        Self {
            producer,
            queue: queue.into(),
        }
    }

    /// Queue an export of the playlist to the given address
    pub async fn export_playlist(
        &self,
        playlist_id: &PlaylistId,
        target_email: &str,
    ) -> Result<()> {
        let message = serde_json::to_string(&ExportRequest {
            playlist_id: playlist_id.clone(),
            target_email: target_email.to_string(),
        })?;

        self.producer.send_message(&self.queue, &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_request_wire_format() {
        let request = ExportRequest {
            playlist_id: PlaylistId::new("playlist-1"),
            target_email: "someone@example.com".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"playlistId": "playlist-1", "targetEmail": "someone@example.com"})
        );
    }
}
