//! Song catalog types

use super::ids::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

/// A song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Release year
    pub year: i32,
    /// Performing artist
    pub performer: String,
    /// Genre label
    pub genre: String,
    /// Length in seconds, when known
    pub duration: Option<i32>,
    /// Album the song belongs to, if any
    pub album_id: Option<AlbumId>,
}

/// Compact song row used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    /// Song identifier
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Performing artist
    pub performer: String,
}

/// Data for creating or replacing a song
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSong {
    /// Song title
    pub title: String,
    /// Release year, 1900 through the current year
    pub year: i32,
    /// Performing artist
    pub performer: String,
    /// Genre label
    pub genre: String,
    #[serde(default)]
    /// Length in seconds
    pub duration: Option<i32>,
    #[serde(default)]
    /// Album to attach the song to
    pub album_id: Option<AlbumId>,
}

/// Optional substring filters for song listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongFilter {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Case-insensitive performer substring
    pub performer: Option<String>,
}
