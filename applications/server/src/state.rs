/// Shared application state
use crate::services::{
    AlbumLikeService, AuthService, CollaborationService, ExportService, FileStorage,
    PlaylistService, SongService,
};
use songbook_core::CacheStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    pub songs: Arc<SongService>,
    pub collaborations: Arc<CollaborationService>,
    pub playlists: Arc<PlaylistService>,
    pub album_likes: Arc<AlbumLikeService>,
    pub exports: Arc<ExportService>,
    /// Base URL for links to uploaded files, without a trailing slash
    pub public_url: String,
}

impl AppState {
    /// Wire the services around one pool and one cache
    pub fn new(
        pool: SqlitePool,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        cache: Arc<dyn CacheStore>,
        exports: Arc<ExportService>,
        cache_ttl: Duration,
        public_url: impl Into<String>,
    ) -> Self {
        let songs = Arc::new(SongService::new(pool.clone()));
        let collaborations = Arc::new(CollaborationService::new(pool.clone(), Arc::clone(&cache)));
        let playlists = Arc::new(PlaylistService::new(
            pool.clone(),
            Arc::clone(&cache),
            songs.clone(),
            collaborations.clone(),
            cache_ttl,
        ));
        let album_likes = Arc::new(AlbumLikeService::new(pool.clone(), cache, cache_ttl));

        Self {
            pool,
            auth_service,
            file_storage,
            songs,
            collaborations,
            playlists,
            album_likes,
            exports,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }
}
