//! Songbook Core
//!
//! Shared domain types, traits, and error handling for the Songbook music catalog.
//!
//! This crate provides the building blocks used by the storage layer and the
//! HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Album`, `Playlist`, `Activity`, `User`, etc.
//! - **Collaborator Traits**: `CacheStore`, `SongLookup`, `CollaborationChecker`
//! - **Error Handling**: Unified `SongbookError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use songbook_core::types::{PlaylistId, UserId, PlaylistAccess};
//!
//! let owner = UserId::new("user-abc");
//! let playlist = PlaylistId::generate();
//! assert!(playlist.as_str().starts_with("playlist-"));
//! assert_ne!(PlaylistAccess::Owner, PlaylistAccess::Collaborator);
//! # let _ = owner;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SongbookError};
pub use traits::{CacheStore, CollaborationChecker, SongLookup};

pub use types::{
    Activity, ActivityAction, Album, AlbumId, AlbumWithSongs, Cached, CreateAlbum, CreateSong,
    CreateUser, PlaylistAccess, PlaylistActivities, PlaylistId, PlaylistSummary,
    PlaylistWithSongs, Song, SongFilter, SongId, SongSummary, User, UserId,
};
