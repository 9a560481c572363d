//! Playlist song activity log (append-only)

use songbook_core::{
    error::Result,
    types::{short_id, Activity, ActivityAction, PlaylistId, SongId, UserId},
};
use sqlx::{Row, SqlitePool};

/// Append an activity row with a server-generated id and timestamp
pub async fn insert(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
    user_id: &UserId,
    action: ActivityAction,
) -> Result<String> {
    let id = short_id();

    sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action, time)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(song_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(crate::now())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Activity log of a playlist in insertion order, joined with song titles and usernames
pub async fn get_for_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<Activity>> {
    let rows = sqlx::query(
        r#"
        SELECT u.username, s.title, a.action, a.time
        FROM playlist_song_activities a
        JOIN songs s ON s.id = a.song_id
        JOIN users u ON u.id = a.user_id
        WHERE a.playlist_id = ?
        ORDER BY a.rowid
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<Activity> {
            Ok(Activity {
                username: row.try_get("username")?,
                title: row.try_get("title")?,
                action: row.try_get("action")?,
                time: row.try_get("time")?,
            })
        })
        .collect()
}
