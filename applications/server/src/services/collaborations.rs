/// Collaboration management and the collaborator check
use crate::services::cache::playlists_key;
use async_trait::async_trait;
use songbook_core::{
    types::CollaborationId, CacheStore, CollaborationChecker, PlaylistId, Result, SongbookError,
    UserId,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct CollaborationService {
    pool: SqlitePool,
    cache: Arc<dyn CacheStore>,
}

impl CollaborationService {
    pub fn new(pool: SqlitePool, cache: Arc<dyn CacheStore>) -> Self {
        Self { pool, cache }
    }

    /// Grant a user access to a playlist. The user must exist.
    pub async fn add_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<CollaborationId> {
        songbook_storage::users::get_by_id(&self.pool, user_id).await?;

        let id = songbook_storage::collaborations::add(&self.pool, playlist_id, user_id).await?;

        // The collaborator's listing now includes the playlist
        self.cache.delete(&playlists_key(user_id)).await?;
        tracing::debug!(playlist = %playlist_id, user = %user_id, "Collaboration added");

        Ok(id)
    }

    /// Revoke a user's access to a playlist
    pub async fn delete_collaboration(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<()> {
        songbook_storage::collaborations::delete(&self.pool, playlist_id, user_id).await?;

        self.cache.delete(&playlists_key(user_id)).await?;
        tracing::debug!(playlist = %playlist_id, user = %user_id, "Collaboration removed");

        Ok(())
    }
}

#[async_trait]
impl CollaborationChecker for CollaborationService {
    async fn verify_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        if songbook_storage::collaborations::exists(&self.pool, playlist_id, user_id).await? {
            Ok(())
        } else {
            Err(SongbookError::invariant("Collaboration could not be verified"))
        }
    }
}
