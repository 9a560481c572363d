/// File storage service - manages uploaded album covers on disk
use crate::error::{Result, ServerError};
use songbook_core::{types::short_id, AlbumId};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Largest accepted cover upload, in bytes
pub const MAX_COVER_BYTES: usize = 512_000;

/// Subdirectory of the uploads root that holds images, also the URL path segment
pub const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(self.images_dir()).await?;
        Ok(())
    }

    /// Directory served at `/uploads/images`
    pub fn images_dir(&self) -> PathBuf {
        self.base_path.join(IMAGES_DIR)
    }

    /// Uploads root
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Store a cover image and return the generated file name.
    ///
    /// `content_type` must be an `image/*` type and the data at most
    /// [`MAX_COVER_BYTES`] long.
    pub async fn store_cover(
        &self,
        album_id: &AlbumId,
        original_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<String> {
        if !content_type.starts_with("image/") {
            return Err(ServerError::BadRequest(
                "Cover must be an image".to_string(),
            ));
        }

        if data.len() > MAX_COVER_BYTES {
            return Err(ServerError::PayloadTooLarge(format!(
                "Cover must be at most {} bytes",
                MAX_COVER_BYTES
            )));
        }

        let extension = cover_extension(original_name, content_type);
        let file_name = format!("{}-{}.{}", album_id.as_str(), short_id(), extension);
        let path = self.images_dir().join(&file_name);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::debug!("Stored cover {:?}", path);

        Ok(file_name)
    }
}

/// Extension from the uploaded file name, else from the content type
fn cover_extension(original_name: Option<&str>, content_type: &str) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .or_else(|| {
            mime_guess::get_mime_extensions_str(content_type)
                .and_then(|exts| exts.first())
                .map(|ext| (*ext).to_string())
        })
        .unwrap_or_else(|| "img".to_string())
}
