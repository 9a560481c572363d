/// Album likes with a cached per-album count
use crate::services::cache::likes_key;
use songbook_core::{types::LikeId, AlbumId, CacheStore, Cached, Result, SongbookError, UserId};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AlbumLikeService {
    pool: SqlitePool,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
}

impl AlbumLikeService {
    pub fn new(pool: SqlitePool, cache: Arc<dyn CacheStore>, cache_ttl: Duration) -> Self {
        Self {
            pool,
            cache,
            cache_ttl,
        }
    }

    /// Like an album. The album must exist and not be liked yet.
    pub async fn like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<LikeId> {
        songbook_storage::albums::get_by_id(&self.pool, album_id)
            .await?
            .ok_or_else(|| SongbookError::not_found("Album not found"))?;

        let id = songbook_storage::album_likes::add(&self.pool, user_id, album_id).await?;
        self.cache.delete(&likes_key(album_id)).await?;
        Ok(id)
    }

    /// Withdraw a like
    pub async fn unlike(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
        songbook_storage::album_likes::remove(&self.pool, user_id, album_id).await?;
        self.cache.delete(&likes_key(album_id)).await
    }

    /// Number of likes, read cache-aside
    pub async fn count(&self, album_id: &AlbumId) -> Result<Cached<u64>> {
        let key = likes_key(album_id);

        if let Some(raw) = self.cache.get(&key).await? {
            let count: u64 = serde_json::from_str(&raw)?;
            return Ok(Cached::hit(count));
        }

        let count = songbook_storage::album_likes::count(&self.pool, album_id).await?;
        self.cache
            .set(&key, &count.to_string(), Some(self.cache_ttl))
            .await?;

        Ok(Cached::miss(count))
    }
}
