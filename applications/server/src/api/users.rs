/// Users API routes
use crate::{
    api::{Envelope, Payload},
    error::Result,
    state::AppState,
    validation::{require_non_empty, Validate},
};
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;
use songbook_core::{CreateUser, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub fullname: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("fullname", &self.fullname)
    }
}

/// POST /users
pub async fn create_user(
    State(app_state): State<AppState>,
    Payload(req): Payload<CreateUserRequest>,
) -> Result<Envelope> {
    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user_id = songbook_storage::users::create(
        &app_state.pool,
        CreateUser {
            username: req.username,
            password_hash,
            fullname: req.fullname,
        },
    )
    .await?;

    Ok(Envelope::created(
        "User added successfully",
        json!({ "userId": user_id }),
    ))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    let user = songbook_storage::users::get_by_id(&app_state.pool, &UserId::new(id)).await?;
    Ok(Envelope::ok(json!({ "user": user })))
}
