//! Collaborator traits consumed by the playlist service

use crate::error::Result;
use crate::types::{PlaylistId, Song, SongId, UserId};
use async_trait::async_trait;
use std::time::Duration;

/// Key-value side channel with optional expiry.
///
/// A miss is `Ok(None)`; errors are reserved for backend failures.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Resolves song references
#[async_trait]
pub trait SongLookup: Send + Sync {
    /// Get a song, failing with `NotFound` when it does not exist
    async fn get_song_by_id(&self, id: &SongId) -> Result<Song>;
}

/// Answers "is user X a collaborator on playlist Y"
#[async_trait]
pub trait CollaborationChecker: Send + Sync {
    /// Succeeds when the user collaborates on the playlist
    async fn verify_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<()>;
}
