//! Playlist and playlist membership queries
//!
//! These functions report raw outcomes (`Option`, affected row counts); the
//! playlist service decides which outcome is an error.

use crate::songs::map_summary;
use songbook_core::{
    error::Result,
    types::{Playlist, PlaylistId, PlaylistSummary, PlaylistWithSongs, SongId, UserId},
};
use sqlx::{Row, SqlitePool};

/// Insert a playlist, returning the id the database reports back
pub async fn insert(
    pool: &SqlitePool,
    id: &PlaylistId,
    name: &str,
    owner: &UserId,
) -> Result<Option<PlaylistId>> {
    let row = sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?) RETURNING id")
        .bind(id)
        .bind(name)
        .bind(owner)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(row.try_get("id")?),
        None => Ok(None),
    }
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(Playlist {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            owner: row.try_get("owner")?,
        })),
        None => Ok(None),
    }
}

/// Playlists the user owns or collaborates on, owner shown by username
pub async fn get_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        JOIN users u ON u.id = p.owner
        WHERE p.owner = ?1
           OR p.id IN (SELECT c.playlist_id FROM collaborations c WHERE c.user_id = ?1)
        ORDER BY p.rowid
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<PlaylistSummary> {
            Ok(PlaylistSummary {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                username: row.try_get("username")?,
            })
        })
        .collect()
}

/// Delete a playlist, returning its owner when a row was removed
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<UserId>> {
    let row = sqlx::query("DELETE FROM playlists WHERE id = ? RETURNING owner")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("owner")?)),
        None => Ok(None),
    }
}

/// Users whose playlist listings include this playlist: the owner first, then collaborators
pub async fn member_ids(pool: &SqlitePool, id: &PlaylistId) -> Result<Vec<UserId>> {
    let rows = sqlx::query(
        r#"
        SELECT owner AS user_id, 0 AS ord FROM playlists WHERE id = ?1
        UNION
        SELECT user_id, 1 AS ord FROM collaborations WHERE playlist_id = ?1
        ORDER BY ord
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<UserId> { Ok(row.try_get("user_id")?) })
        .collect()
}

/// Insert a membership row. Nothing is inserted when the playlist does not exist.
///
/// Returns the number of rows inserted.
pub async fn insert_song(
    pool: &SqlitePool,
    membership_id: &str,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_songs (id, playlist_id, song_id)
        SELECT ?1, ?2, ?3
        WHERE EXISTS (SELECT 1 FROM playlists WHERE id = ?2)
        "#,
    )
    .bind(membership_id)
    .bind(playlist_id)
    .bind(song_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete every membership row for the song. Returns the number of rows removed.
pub async fn delete_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<u64> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Playlist with its songs, or `None` when the join yields no rows.
///
/// A playlist with zero songs also yields `None`.
pub async fn get_songs(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<PlaylistWithSongs>> {
    let rows = sqlx::query(
        r#"
        SELECT p.id AS playlist_id, p.name, u.username, s.id, s.title, s.performer
        FROM playlist_songs ps
        JOIN playlists p ON p.id = ps.playlist_id
        JOIN songs s ON s.id = ps.song_id
        JOIN users u ON u.id = p.owner
        WHERE ps.playlist_id = ?
        ORDER BY ps.rowid
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let Some(first) = rows.first() else {
        return Ok(None);
    };

    Ok(Some(PlaylistWithSongs {
        id: first.try_get("playlist_id")?,
        name: first.try_get("name")?,
        username: first.try_get("username")?,
        songs: rows.iter().map(map_summary).collect::<Result<_>>()?,
    }))
}
