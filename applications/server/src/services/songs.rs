/// Song lookup used to validate song references
use async_trait::async_trait;
use songbook_core::{Result, Song, SongId, SongLookup, SongbookError};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SongService {
    pool: SqlitePool,
}

impl SongService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongLookup for SongService {
    async fn get_song_by_id(&self, id: &SongId) -> Result<Song> {
        songbook_storage::songs::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| SongbookError::not_found("Song not found"))
    }
}
