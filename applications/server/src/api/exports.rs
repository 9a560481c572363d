/// Export API routes
use crate::{
    api::{Envelope, Payload},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
    validation::{require_email, Validate},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use songbook_core::PlaylistId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistRequest {
    pub target_email: String,
}

impl Validate for ExportPlaylistRequest {
    fn validate(&self) -> Result<()> {
        require_email("targetEmail", &self.target_email)
    }
}

/// POST /export/playlists/:id
/// Queue an export of the playlist, owner only
pub async fn export_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<ExportPlaylistRequest>,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(id);

    app_state
        .playlists
        .verify_playlist_owner(&playlist_id, auth.user_id())
        .await?;
    app_state
        .exports
        .export_playlist(&playlist_id, &req.target_email)
        .await?;

    Ok(Envelope::message("Your request is being processed").with_code(StatusCode::CREATED))
}
