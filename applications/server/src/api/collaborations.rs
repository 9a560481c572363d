/// Collaborations API routes (playlist owner only)
use crate::{
    api::{Envelope, Payload},
    error::Result,
    middleware::AuthenticatedUser,
    state::AppState,
    validation::{require_non_empty, Validate},
};
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;
use songbook_core::{PlaylistId, UserId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub playlist_id: String,
    pub user_id: String,
}

impl Validate for CollaborationRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("playlistId", &self.playlist_id)?;
        require_non_empty("userId", &self.user_id)
    }
}

/// POST /collaborations
pub async fn add_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<CollaborationRequest>,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(req.playlist_id);
    let user_id = UserId::new(req.user_id);

    app_state
        .playlists
        .verify_playlist_owner(&playlist_id, auth.user_id())
        .await?;
    let collaboration_id = app_state
        .collaborations
        .add_collaboration(&playlist_id, &user_id)
        .await?;

    Ok(Envelope::created(
        "Collaboration added successfully",
        json!({ "collaborationId": collaboration_id }),
    ))
}

/// DELETE /collaborations
pub async fn delete_collaboration(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Payload(req): Payload<CollaborationRequest>,
) -> Result<Envelope> {
    let playlist_id = PlaylistId::new(req.playlist_id);
    let user_id = UserId::new(req.user_id);

    app_state
        .playlists
        .verify_playlist_owner(&playlist_id, auth.user_id())
        .await?;
    app_state
        .collaborations
        .delete_collaboration(&playlist_id, &user_id)
        .await?;

    Ok(Envelope::message("Collaboration deleted successfully"))
}
