//! Song catalog queries

use songbook_core::{
    error::Result,
    types::{AlbumId, CreateSong, Song, SongFilter, SongId, SongSummary},
    SongbookError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_song(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        year: row.try_get("year")?,
        performer: row.try_get("performer")?,
        genre: row.try_get("genre")?,
        duration: row.try_get("duration")?,
        album_id: row.try_get("album_id")?,
    })
}

pub(crate) fn map_summary(row: &SqliteRow) -> Result<SongSummary> {
    Ok(SongSummary {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        performer: row.try_get("performer")?,
    })
}

/// Insert a song and return its generated id
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<SongId> {
    let id = SongId::generate();
    let now = crate::now();

    let result = sqlx::query(
        r#"
        INSERT INTO songs
            (id, title, year, performer, genre, duration, album_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant("Failed to add song"));
    }

    Ok(id)
}

/// List songs, optionally filtered by case-insensitive title/performer substrings
pub async fn get_all(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<SongSummary>> {
    let title = filter.title.as_ref().map(|t| format!("%{}%", t));
    let performer = filter.performer.as_ref().map(|p| format!("%{}%", p));

    let rows = sqlx::query(
        r#"
        SELECT id, title, performer
        FROM songs
        WHERE (?1 IS NULL OR title LIKE ?1)
          AND (?2 IS NULL OR performer LIKE ?2)
        ORDER BY created_at, id
        "#,
    )
    .bind(title)
    .bind(performer)
    .fetch_all(pool)
    .await?;

    rows.iter().map(map_summary).collect()
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, title, year, performer, genre, duration, album_id FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(map_song).transpose()
}

/// Songs that belong to an album
pub async fn get_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<SongSummary>> {
    let rows = sqlx::query(
        "SELECT id, title, performer FROM songs WHERE album_id = ? ORDER BY created_at, id",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(map_summary).collect()
}

/// Replace a song's fields. Fails with `NotFound` for unknown ids.
pub async fn update(pool: &SqlitePool, id: &SongId, song: CreateSong) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, year = ?, performer = ?, genre = ?,
            duration = ?, album_id = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(crate::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Failed to update song. Id not found"));
    }

    Ok(())
}

/// Delete a song. Fails with `NotFound` for unknown ids.
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Failed to delete song. Id not found"));
    }

    Ok(())
}
