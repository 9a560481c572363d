//! Album like queries

use songbook_core::{
    error::Result,
    types::{AlbumId, LikeId, UserId},
    SongbookError,
};
use sqlx::{Row, SqlitePool};

/// Record a like. Fails with `Invariant` when the user already likes the album.
pub async fn add(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<LikeId> {
    let id = LikeId::generate();
    let result = sqlx::query(
        r#"
        INSERT INTO user_album_likes (id, user_id, album_id)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, album_id) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(album_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant("You already like this album"));
    }

    Ok(id)
}

/// Remove a like. Fails with `NotFound` when there was none.
pub async fn remove(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id)
        .bind(album_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::not_found("Like not found"));
    }

    Ok(())
}

/// Number of users who like the album
pub async fn count(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM user_album_likes WHERE album_id = ?")
        .bind(album_id)
        .fetch_one(pool)
        .await?;

    let count: i64 = row.try_get("count")?;
    Ok(u64::try_from(count).unwrap_or_default())
}
