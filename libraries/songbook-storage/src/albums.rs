//! Album queries

use crate::songs;
use songbook_core::{
    error::Result,
    types::{Album, AlbumId, AlbumWithSongs, CreateAlbum},
    SongbookError,
};
use sqlx::{Row, SqlitePool};

/// Insert an album and return its generated id
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<AlbumId> {
    let id = AlbumId::generate();
    let now = crate::now();

    let result = sqlx::query(
        "INSERT INTO albums (id, name, year, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&album.name)
    .bind(album.year)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant("Failed to add album"));
    }

    Ok(id)
}

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year, cover_url FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(Album {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            year: row.try_get("year")?,
            cover_url: row.try_get("cover_url")?,
        })),
        None => Ok(None),
    }
}

/// Get album with its songs, failing with `NotFound`
pub async fn get_with_songs(pool: &SqlitePool, id: &AlbumId) -> Result<AlbumWithSongs> {
    let album = get_by_id(pool, id)
        .await?
        .ok_or_else(|| SongbookError::not_found("Album not found"))?;

    let songs = songs::get_by_album(pool, id).await?;

    Ok(AlbumWithSongs {
        id: album.id,
        name: album.name,
        year: album.year,
        cover_url: album.cover_url,
        songs,
    })
}

/// Replace an album's name and year. Fails with `NotFound` for unknown ids.
pub async fn update(pool: &SqlitePool, id: &AlbumId, album: CreateAlbum) -> Result<()> {
    let result = sqlx::query("UPDATE albums SET name = ?, year = ?, updated_at = ? WHERE id = ?")
        .bind(&album.name)
        .bind(album.year)
        .bind(crate::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Failed to update album. Id not found"));
    }

    Ok(())
}

/// Point an album at an uploaded cover image
pub async fn set_cover_url(pool: &SqlitePool, id: &AlbumId, cover_url: &str) -> Result<()> {
    let result = sqlx::query("UPDATE albums SET cover_url = ?, updated_at = ? WHERE id = ?")
        .bind(cover_url)
        .bind(crate::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Album not found"));
    }

    Ok(())
}

/// Delete an album. Fails with `NotFound` for unknown ids.
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Failed to delete album. Id not found"));
    }

    Ok(())
}
