/// Playlist service - lifecycle, song membership, access control and activity log
///
/// Writes go straight to the relational store, one statement each. The
/// `playlists:{userId}` cache entries of every member of the touched playlist
/// are deleted afterwards so their next listing is rebuilt from the store.
use crate::services::cache::playlists_key;
use songbook_core::{
    types::short_id, Activity, ActivityAction, CacheStore, Cached, CollaborationChecker,
    PlaylistAccess, PlaylistActivities, PlaylistId, PlaylistSummary, PlaylistWithSongs, Result,
    SongId, SongLookup, SongbookError, UserId,
};
use songbook_storage::{activities, playlists};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

const FORBIDDEN_MESSAGE: &str = "You are not entitled to access this resource";

#[derive(Clone)]
pub struct PlaylistService {
    pool: SqlitePool,
    cache: Arc<dyn CacheStore>,
    songs: Arc<dyn SongLookup>,
    collaborations: Arc<dyn CollaborationChecker>,
    cache_ttl: Duration,
}

impl PlaylistService {
    pub fn new(
        pool: SqlitePool,
        cache: Arc<dyn CacheStore>,
        songs: Arc<dyn SongLookup>,
        collaborations: Arc<dyn CollaborationChecker>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            pool,
            cache,
            songs,
            collaborations,
            cache_ttl,
        }
    }

    /// Create a playlist owned by `owner`
    pub async fn add_playlist(&self, name: &str, owner: &UserId) -> Result<PlaylistId> {
        let id = PlaylistId::generate();

        let id = playlists::insert(&self.pool, &id, name, owner)
            .await?
            .ok_or_else(|| SongbookError::invariant("Failed to add playlist"))?;

        self.invalidate_users(std::slice::from_ref(owner)).await?;
        Ok(id)
    }

    /// Playlists the user owns or collaborates on, read cache-aside
    pub async fn get_playlists(&self, user_id: &UserId) -> Result<Cached<Vec<PlaylistSummary>>> {
        let key = playlists_key(user_id);

        if let Some(raw) = self.cache.get(&key).await? {
            let playlists: Vec<PlaylistSummary> = serde_json::from_str(&raw)?;
            return Ok(Cached::hit(playlists));
        }

        let playlists = playlists::get_for_user(&self.pool, user_id).await?;
        self.cache
            .set(&key, &serde_json::to_string(&playlists)?, Some(self.cache_ttl))
            .await?;

        Ok(Cached::miss(playlists))
    }

    /// Delete a playlist. Its memberships and collaborations go with it.
    pub async fn delete_playlist_by_id(&self, id: &PlaylistId) -> Result<()> {
        // Collaborations cascade away with the row, so collect members first
        let mut members = playlists::member_ids(&self.pool, id).await?;

        let owner = playlists::delete(&self.pool, id)
            .await?
            .ok_or_else(|| SongbookError::not_found("Failed to delete playlist. Id not found"))?;

        if !members.contains(&owner) {
            members.push(owner);
        }
        self.invalidate_users(&members).await
    }

    /// Add a song to a playlist, returning the membership id.
    ///
    /// The song is resolved first; an unknown song fails before anything is written.
    pub async fn add_song_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<String> {
        let song = self.songs.get_song_by_id(song_id).await?;

        let id = short_id();
        let inserted = playlists::insert_song(&self.pool, &id, playlist_id, &song.id).await?;
        if inserted == 0 {
            return Err(SongbookError::invariant("Failed to add song to playlist"));
        }

        self.invalidate_members(playlist_id).await?;
        Ok(id)
    }

    /// Playlist with its songs.
    ///
    /// An empty join is reported as `NotFound`, whether the playlist is missing
    /// or just has no songs.
    pub async fn get_songs_on_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<PlaylistWithSongs> {
        playlists::get_songs(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| SongbookError::not_found("No songs found on this playlist"))
    }

    /// Remove every membership row of the song from the playlist
    pub async fn delete_song_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        let removed = playlists::delete_song(&self.pool, playlist_id, song_id).await?;
        if removed == 0 {
            return Err(SongbookError::invariant("Failed to remove song from playlist"));
        }

        self.invalidate_members(playlist_id).await
    }

    /// Succeeds only for the playlist's owner
    pub async fn verify_playlist_owner(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<()> {
        let playlist = playlists::get_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| SongbookError::not_found("Playlist not found"))?;

        if playlist.owner != *user_id {
            return Err(SongbookError::authorization(FORBIDDEN_MESSAGE));
        }
        Ok(())
    }

    /// Classify the user's access: owner first, then collaborator.
    ///
    /// A missing playlist is `NotFound` regardless of collaborations. When
    /// neither check passes the ownership failure is kept as the reason.
    pub async fn check_playlist_access(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<PlaylistAccess> {
        let denied = match self.verify_playlist_owner(playlist_id, user_id).await {
            Ok(()) => return Ok(PlaylistAccess::Owner),
            Err(SongbookError::Authorization(reason)) => reason,
            Err(err) => return Err(err),
        };

        match self
            .collaborations
            .verify_collaborator(playlist_id, user_id)
            .await
        {
            Ok(()) => Ok(PlaylistAccess::Collaborator),
            Err(err) if err.is_client_error() => {
                tracing::warn!(playlist = %playlist_id, user = %user_id, "Playlist access denied");
                Ok(PlaylistAccess::Denied(denied))
            }
            Err(err) => Err(err),
        }
    }

    /// Succeeds for the owner or a collaborator, else fails with the ownership failure
    pub async fn verify_playlist_access(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<()> {
        match self.check_playlist_access(playlist_id, user_id).await? {
            PlaylistAccess::Owner | PlaylistAccess::Collaborator => Ok(()),
            PlaylistAccess::Denied(reason) => Err(SongbookError::Authorization(reason)),
        }
    }

    /// Append an activity row. The action is stored as given.
    pub async fn add_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<()> {
        activities::insert(&self.pool, playlist_id, song_id, user_id, action).await?;
        Ok(())
    }

    /// Activity log of a playlist; an empty log is `NotFound`
    pub async fn get_activities(&self, playlist_id: &PlaylistId) -> Result<PlaylistActivities> {
        let activities: Vec<Activity> =
            activities::get_for_playlist(&self.pool, playlist_id).await?;
        if activities.is_empty() {
            return Err(SongbookError::not_found("No activities found"));
        }

        Ok(PlaylistActivities {
            playlist_id: playlist_id.clone(),
            activities,
        })
    }

    async fn invalidate_members(&self, playlist_id: &PlaylistId) -> Result<()> {
        let members = playlists::member_ids(&self.pool, playlist_id).await?;
        self.invalidate_users(&members).await
    }

    async fn invalidate_users(&self, users: &[UserId]) -> Result<()> {
        for user_id in users {
            self.cache.delete(&playlists_key(user_id)).await?;
        }
        tracing::debug!("Invalidated playlist listings of {} user(s)", users.len());
        Ok(())
    }
}
