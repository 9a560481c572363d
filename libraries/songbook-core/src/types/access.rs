//! Playlist access decisions

use serde::Serialize;

/// Outcome of a two-step playlist access check.
///
/// Ownership is checked first, collaboration second. When neither holds, the
/// ownership failure message is kept as the reason reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", content = "reason", rename_all = "lowercase")]
pub enum PlaylistAccess {
    /// The user owns the playlist
    Owner,
    /// The user was added as a collaborator
    Collaborator,
    /// Neither; carries the message reported to the caller
    Denied(String),
}
