/// Server error types and the failure half of the response envelope
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use songbook_core::SongbookError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message returned for every server fault
pub const SERVER_FAULT_MESSAGE: &str = "Sorry, something went wrong on our server";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Domain(#[from] SongbookError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        ServerError::Domain(err.into())
    }
}

impl ServerError {
    /// Status code and client-visible message. `None` marks a server fault.
    fn client_failure(&self) -> Option<(StatusCode, String)> {
        match self {
            ServerError::Domain(err) => {
                let status = match err {
                    SongbookError::Invariant(_) | SongbookError::InvalidInput(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    SongbookError::NotFound(_) => StatusCode::NOT_FOUND,
                    SongbookError::Authorization(_) => StatusCode::FORBIDDEN,
                    SongbookError::Authentication(_) => StatusCode::UNAUTHORIZED,
                    _ => return None,
                };
                Some((status, err.to_string()))
            }
            ServerError::BadRequest(msg) => Some((StatusCode::BAD_REQUEST, msg.clone())),
            ServerError::PayloadTooLarge(msg) => {
                Some((StatusCode::PAYLOAD_TOO_LARGE, msg.clone()))
            }
            ServerError::Jwt(_) => Some((StatusCode::UNAUTHORIZED, "Invalid token".to_string())),
            ServerError::Config(_) | ServerError::Io(_) | ServerError::Bcrypt(_) => None,
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.client_failure()
            .map(|(status, _)| status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self.client_failure() {
            Some((status, message)) => {
                let body = Json(json!({
                    "status": "fail",
                    "message": message,
                }));
                (status, body).into_response()
            }
            None => {
                tracing::error!("Server error: {:?}", self);
                let body = Json(json!({
                    "status": "error",
                    "message": SERVER_FAULT_MESSAGE,
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
