//! Playlist collaboration queries

use songbook_core::{
    error::Result,
    types::{CollaborationId, PlaylistId, UserId},
    SongbookError,
};
use sqlx::{Row, SqlitePool};

/// Grant a user collaborator access. Fails with `Invariant` when nothing was inserted.
pub async fn add(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_id: &UserId,
) -> Result<CollaborationId> {
    let id = CollaborationId::generate();

    let result = sqlx::query(
        r#"
        INSERT INTO collaborations (id, playlist_id, user_id)
        VALUES (?, ?, ?)
        ON CONFLICT(playlist_id, user_id) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant("Failed to add collaboration"));
    }

    Ok(id)
}

/// Revoke collaborator access. Fails with `Invariant` when there was none.
pub async fn delete(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant("Failed to delete collaboration"));
    }

    Ok(())
}

/// Whether the user collaborates on the playlist
pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM collaborations WHERE playlist_id = ? AND user_id = ?",
    )
    .bind(playlist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}
