//! Album types

use super::ids::AlbumId;
use super::song::SongSummary;
use serde::{Deserialize, Serialize};

/// Album record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Unique album identifier
    pub id: AlbumId,
    /// Album name
    pub name: String,
    /// Release year
    pub year: i32,
    /// Public URL of the uploaded cover
    pub cover_url: Option<String>,
}

/// Album together with the songs that reference it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumWithSongs {
    /// Album identifier
    pub id: AlbumId,
    /// Album name
    pub name: String,
    /// Release year
    pub year: i32,
    /// Public URL of the uploaded cover
    pub cover_url: Option<String>,
    /// Songs referencing this album
    pub songs: Vec<SongSummary>,
}

/// Data for creating or replacing an album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    /// Album name
    pub name: String,
    /// Release year
    pub year: i32,
}
