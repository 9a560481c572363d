//! Persisted refresh tokens

use songbook_core::{error::Result, SongbookError};
use sqlx::{Row, SqlitePool};

/// Remember a refresh token as valid
pub async fn add_refresh_token(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("INSERT INTO authentications (token) VALUES (?)")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Fail with `Invariant` unless the refresh token is currently valid
pub async fn verify_refresh_token(pool: &SqlitePool, token: &str) -> Result<()> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM authentications WHERE token = ?")
        .bind(token)
        .fetch_one(pool)
        .await?;

    if row.try_get::<i64, _>("count")? == 0 {
        return Err(SongbookError::invariant("Invalid refresh token"));
    }

    Ok(())
}

/// Forget a refresh token
pub async fn delete_refresh_token(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM authentications WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
