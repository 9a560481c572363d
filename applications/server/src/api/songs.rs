/// Songs API routes
use crate::{
    api::{Envelope, Payload},
    error::Result,
    state::AppState,
    validation::{require_non_empty, require_non_negative, require_year, Validate},
};
use axum::extract::{Path, Query, State};
use serde_json::json;
use songbook_core::{CreateSong, SongFilter, SongId, SongLookup, SongbookError};
use sqlx::SqlitePool;

impl Validate for CreateSong {
    fn validate(&self) -> Result<()> {
        require_non_empty("title", &self.title)?;
        require_year("year", self.year)?;
        require_non_empty("performer", &self.performer)?;
        require_non_empty("genre", &self.genre)?;
        require_non_negative("duration", self.duration)
    }
}

/// A referenced album must exist
async fn check_album(pool: &SqlitePool, song: &CreateSong) -> Result<()> {
    if let Some(album_id) = &song.album_id {
        songbook_storage::albums::get_by_id(pool, album_id)
            .await?
            .ok_or_else(|| SongbookError::not_found("Album not found"))?;
    }
    Ok(())
}

/// POST /songs
pub async fn create_song(
    State(app_state): State<AppState>,
    Payload(song): Payload<CreateSong>,
) -> Result<Envelope> {
    check_album(&app_state.pool, &song).await?;
    let song_id = songbook_storage::songs::create(&app_state.pool, song).await?;

    Ok(Envelope::created(
        "Song added successfully",
        json!({ "songId": song_id }),
    ))
}

/// GET /songs?title=&performer=
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(filter): Query<SongFilter>,
) -> Result<Envelope> {
    let songs = songbook_storage::songs::get_all(&app_state.pool, &filter).await?;
    Ok(Envelope::ok(json!({ "songs": songs })))
}

/// GET /songs/:id
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    let song = app_state.songs.get_song_by_id(&SongId::new(id)).await?;
    Ok(Envelope::ok(json!({ "song": song })))
}

/// PUT /songs/:id
pub async fn update_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Payload(song): Payload<CreateSong>,
) -> Result<Envelope> {
    check_album(&app_state.pool, &song).await?;
    songbook_storage::songs::update(&app_state.pool, &SongId::new(id), song).await?;
    Ok(Envelope::message("Song updated successfully"))
}

/// DELETE /songs/:id
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    songbook_storage::songs::delete(&app_state.pool, &SongId::new(id)).await?;
    Ok(Envelope::message("Song deleted successfully"))
}
