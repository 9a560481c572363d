//! Playlist, membership and activity types

use super::ids::{PlaylistId, UserId};
use super::song::SongSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playlist row. The owner never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,
    /// Playlist name
    pub name: String,
    /// User who created the playlist
    pub owner: UserId,
}

/// Playlist as listed for a user: owner shown by username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Playlist identifier
    pub id: PlaylistId,
    /// Playlist name
    pub name: String,
    /// Owner's username
    pub username: String,
}

/// Playlist with its songs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithSongs {
    /// Playlist identifier
    pub id: PlaylistId,
    /// Playlist name
    pub name: String,
    /// Owner's username
    pub username: String,
    /// Songs in membership order
    pub songs: Vec<SongSummary>,
}

/// Kind of membership change recorded in the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// A song was added
    Add,
    /// A song was removed
    Delete,
}

impl ActivityAction {
    /// Tag stored in the `action` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ActivityAction::Add),
            "delete" => Ok(ActivityAction::Delete),
            other => Err(format!("Unknown activity action: {}", other)),
        }
    }
}

/// One entry of a playlist's activity log, denormalized for display.
///
/// `action` is kept as the stored tag; the log is append-only and is shown
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// User who made the change
    pub username: String,
    /// Title of the song added or removed
    pub title: String,
    /// `add` or `delete`
    pub action: String,
    /// RFC 3339 timestamp
    pub time: String,
}

/// Activity log of one playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivities {
    /// Playlist the log belongs to
    pub playlist_id: PlaylistId,
    /// Entries, oldest first
    pub activities: Vec<Activity>,
}
