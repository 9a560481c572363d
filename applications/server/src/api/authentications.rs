/// Authentication API routes
use crate::{
    api::{Envelope, Payload},
    error::Result,
    state::AppState,
    validation::{require_non_empty, Validate},
};
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;
use songbook_core::SongbookError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

impl Validate for RefreshTokenRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("refreshToken", &self.refresh_token)
    }
}

fn wrong_credentials() -> SongbookError {
    SongbookError::authentication("The credentials you provided are wrong")
}

/// POST /authentications
pub async fn login(
    State(app_state): State<AppState>,
    Payload(req): Payload<LoginRequest>,
) -> Result<Envelope> {
    let (user_id, password_hash) =
        songbook_storage::users::get_credentials(&app_state.pool, &req.username)
            .await?
            .ok_or_else(wrong_credentials)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(wrong_credentials().into());
    }

    let access_token = app_state.auth_service.create_access_token(&user_id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user_id)?;
    songbook_storage::authentications::add_refresh_token(&app_state.pool, &refresh_token).await?;

    Ok(Envelope::created(
        "Authentication added successfully",
        json!({
            "accessToken": access_token,
            "refreshToken": refresh_token,
        }),
    ))
}

/// PUT /authentications
pub async fn refresh(
    State(app_state): State<AppState>,
    Payload(req): Payload<RefreshTokenRequest>,
) -> Result<Envelope> {
    songbook_storage::authentications::verify_refresh_token(&app_state.pool, &req.refresh_token)
        .await?;

    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)
        .map_err(|_| SongbookError::invariant("Invalid refresh token"))?;

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Envelope::ok(json!({ "accessToken": access_token }))
        .with_message("Access token refreshed successfully"))
}

/// DELETE /authentications
pub async fn logout(
    State(app_state): State<AppState>,
    Payload(req): Payload<RefreshTokenRequest>,
) -> Result<Envelope> {
    songbook_storage::authentications::verify_refresh_token(&app_state.pool, &req.refresh_token)
        .await?;
    songbook_storage::authentications::delete_refresh_token(&app_state.pool, &req.refresh_token)
        .await?;

    Ok(Envelope::message("Refresh token deleted successfully"))
}
