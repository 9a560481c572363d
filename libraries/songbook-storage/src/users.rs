//! User accounts and credential queries

use songbook_core::{
    error::Result,
    types::{CreateUser, User, UserId},
    SongbookError,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn map_user(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        fullname: row.try_get("fullname")?,
    })
}

/// Register a user. Fails with `Invariant` when the username is taken.
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<UserId> {
    let id = UserId::generate();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, username, password, fullname)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(username) DO NOTHING
        "#,
    )
    .bind(&id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.fullname)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SongbookError::invariant(
            "Failed to add user. Username is already taken",
        ));
    }

    Ok(id)
}

/// Get a user by id, failing with `NotFound`
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<User> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| SongbookError::not_found("User not found"))?;

    map_user(&row)
}

/// Get user's id and password hash for authentication
///
/// Returns `None` when no user has this username.
pub async fn get_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some((row.try_get("id")?, row.try_get("password")?))),
        None => Ok(None),
    }
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, fullname FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_user).collect()
}
