/// Playlists API routes
use crate::{
    api::{Envelope, Payload},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
    validation::{require_non_empty, Validate},
};
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use songbook_core::{ActivityAction, PlaylistId, SongId};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

impl Validate for CreatePlaylistRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    pub song_id: String,
}

impl Validate for PlaylistSongRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("songId", &self.song_id)
    }
}

/// POST /playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<CreatePlaylistRequest>,
) -> Result<Envelope> {
    let playlist_id = app_state
        .playlists
        .add_playlist(&req.name, auth.user_id())
        .await?;

    Ok(Envelope::created(
        "Playlist added successfully",
        json!({ "playlistId": playlist_id }),
    ))
}

/// GET /playlists
/// Playlists the caller owns or collaborates on
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    let playlists = app_state.playlists.get_playlists(auth.user_id()).await?;

    Ok(Envelope::ok(json!({ "playlists": playlists.value })).cached(playlists.cached))
}

/// DELETE /playlists/:id
/// Owner only
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_playlist_owner(&playlist_id, auth.user_id())
        .await?;
    app_state.playlists.delete_playlist_by_id(&playlist_id).await?;

    Ok(Envelope::message("Playlist deleted successfully"))
}

/// POST /playlists/:id/songs
pub async fn add_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<PlaylistSongRequest>,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(req.song_id);

    app_state
        .playlists
        .verify_playlist_access(&playlist_id, auth.user_id())
        .await?;
    let membership_id = app_state
        .playlists
        .add_song_to_playlist(&playlist_id, &song_id)
        .await?;
    app_state
        .playlists
        .add_activity(&playlist_id, &song_id, auth.user_id(), ActivityAction::Add)
        .await?;

    Ok(Envelope::created(
        "Song added to playlist",
        json!({ "playlistSongId": membership_id }),
    ))
}

/// GET /playlists/:id/songs
pub async fn get_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_playlist_access(&playlist_id, auth.user_id())
        .await?;
    let playlist = app_state.playlists.get_songs_on_playlist(&playlist_id).await?;

    Ok(Envelope::ok(json!({ "playlist": playlist })))
}

/// DELETE /playlists/:id/songs
pub async fn remove_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<PlaylistSongRequest>,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);
    let song_id = SongId::new(req.song_id);

    app_state
        .playlists
        .verify_playlist_access(&playlist_id, auth.user_id())
        .await?;
    app_state
        .playlists
        .delete_song_from_playlist(&playlist_id, &song_id)
        .await?;
    app_state
        .playlists
        .add_activity(&playlist_id, &song_id, auth.user_id(), ActivityAction::Delete)
        .await?;

    Ok(Envelope::message("Song removed from playlist"))
}

/// GET /playlists/:id/activities
pub async fn get_activities(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_playlist_access(&playlist_id, auth.user_id())
        .await?;
    let activities = app_state.playlists.get_activities(&playlist_id).await?;

    Ok(Envelope::ok(json!({
        "playlistId": activities.playlist_id,
        "activities": activities.activities,
    })))
}
