//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use songbook_core::{
    AlbumId, CacheStore, CreateAlbum, CreateSong, CreateUser, PlaylistId, Result, SongId, UserId,
};
use songbook_server::{
    services::{AuthService, ExportProducer, ExportService, FileStorage, MemoryCache},
    state::AppState,
};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_QUEUE: &str = "export:playlists";

/// Export producer that keeps every message in memory
#[derive(Default)]
pub struct RecordingProducer {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingProducer {
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExportProducer for RecordingProducer {
    async fn send_message(&self, queue: &str, message: &str) -> Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((queue.to_string(), message.to_string()));
        Ok(())
    }
}

/// Fully wired application state over a temp-file database and an in-memory cache
pub struct TestContext {
    pub state: AppState,
    pub pool: SqlitePool,
    pub cache: Arc<MemoryCache>,
    pub producer: Arc<RecordingProducer>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = songbook_storage::create_pool(&db_url).await.unwrap();
        songbook_storage::run_migrations(&pool).await.unwrap();

        let file_storage = FileStorage::new(temp_dir.path().join("uploads"));
        file_storage.initialize().await.unwrap();

        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 3600, 1));

        let cache = Arc::new(MemoryCache::new(128));
        let producer = Arc::new(RecordingProducer::default());
        let exports = Arc::new(ExportService::new(producer.clone(), TEST_QUEUE));

        let state = AppState::new(
            pool.clone(),
            Arc::clone(&auth_service),
            Arc::new(file_storage),
            cache.clone(),
            exports,
            Duration::from_secs(1800),
            "http://localhost:5000",
        );

        Self {
            state,
            pool,
            cache,
            producer,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Bearer token for the user
    pub fn token_for(&self, user_id: &UserId) -> String {
        self.auth_service.create_access_token(user_id).unwrap()
    }

    /// Whether the cache currently holds the user's playlist listing
    pub async fn has_cached_playlists(&self, user_id: &UserId) -> bool {
        self.cache
            .get(&format!("playlists:{}", user_id))
            .await
            .unwrap()
            .is_some()
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> UserId {
    songbook_storage::users::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            fullname: format!("{} fullname", username),
        },
    )
    .await
    .unwrap()
}

pub async fn create_album(pool: &SqlitePool, name: &str) -> AlbumId {
    songbook_storage::albums::create(
        pool,
        CreateAlbum {
            name: name.to_string(),
            year: 2008,
        },
    )
    .await
    .unwrap()
}

pub async fn create_song(pool: &SqlitePool, title: &str) -> SongId {
    songbook_storage::songs::create(
        pool,
        CreateSong {
            title: title.to_string(),
            year: 2008,
            performer: "Coldplay".to_string(),
            genre: "Pop".to_string(),
            duration: Some(240),
            album_id: None,
        },
    )
    .await
    .unwrap()
}

pub async fn share(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) {
    songbook_storage::collaborations::add(pool, playlist_id, user_id)
        .await
        .unwrap();
}
