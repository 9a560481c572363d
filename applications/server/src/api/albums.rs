/// Albums API routes, including cover uploads and likes
use crate::{
    api::{Envelope, Payload},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::file_storage::IMAGES_DIR,
    state::AppState,
    validation::{require_non_empty, require_year, Validate},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use songbook_core::{AlbumId, CreateAlbum, SongbookError};

impl Validate for CreateAlbum {
    fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_year("year", self.year)
    }
}

/// POST /albums
pub async fn create_album(
    State(app_state): State<AppState>,
    Payload(album): Payload<CreateAlbum>,
) -> Result<Envelope> {
    let album_id = songbook_storage::albums::create(&app_state.pool, album).await?;

    Ok(Envelope::created(
        "Album added successfully",
        json!({ "albumId": album_id }),
    ))
}

/// GET /albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    let album = songbook_storage::albums::get_with_songs(&app_state.pool, &AlbumId::new(id)).await?;
    Ok(Envelope::ok(json!({ "album": album })))
}

/// PUT /albums/:id
pub async fn update_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    Payload(album): Payload<CreateAlbum>,
) -> Result<Envelope> {
    songbook_storage::albums::update(&app_state.pool, &AlbumId::new(id), album).await?;
    Ok(Envelope::message("Album updated successfully"))
}

/// DELETE /albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    songbook_storage::albums::delete(&app_state.pool, &AlbumId::new(id)).await?;
    Ok(Envelope::message("Album deleted successfully"))
}

/// POST /albums/:id/covers
/// Upload a cover image as the multipart field `cover`
pub async fn upload_cover(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Envelope> {
    let album_id = AlbumId::new(id);
    songbook_storage::albums::get_by_id(&app_state.pool, &album_id)
        .await?
        .ok_or_else(|| SongbookError::not_found("Album not found"))?;

    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ServerError::BadRequest(format!("Missing boundary: {}", e)))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if field.name() != Some("cover") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let field_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Failed to read cover: {}", e)))?;

        let stored = app_state
            .file_storage
            .store_cover(&album_id, file_name.as_deref(), &field_type, &data)
            .await?;

        let cover_url = format!("{}/uploads/{}/{}", app_state.public_url, IMAGES_DIR, stored);
        songbook_storage::albums::set_cover_url(&app_state.pool, &album_id, &cover_url).await?;

        return Ok(Envelope::created(
            "Cover uploaded successfully",
            json!({ "coverUrl": cover_url }),
        ));
    }

    Err(ServerError::BadRequest("\"cover\" is required".to_string()))
}

/// POST /albums/:id/likes
pub async fn like_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    app_state
        .album_likes
        .like(auth.user_id(), &AlbumId::new(id))
        .await?;

    Ok(Envelope::message("Album liked").with_code(StatusCode::CREATED))
}

/// DELETE /albums/:id/likes
pub async fn unlike_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Envelope> {
    app_state
        .album_likes
        .unlike(auth.user_id(), &AlbumId::new(id))
        .await?;

    Ok(Envelope::message("Album unliked"))
}

/// GET /albums/:id/likes
pub async fn get_likes(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Envelope> {
    let likes = app_state.album_likes.count(&AlbumId::new(id)).await?;
    Ok(Envelope::ok(json!({ "likes": likes.value })).cached(likes.cached))
}
