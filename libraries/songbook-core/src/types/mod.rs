//! Domain types shared by storage and server

mod access;
mod album;
mod cached;
mod ids;
mod playlist;
mod song;
mod user;

pub use access::PlaylistAccess;
pub use album::{Album, AlbumWithSongs, CreateAlbum};
pub use cached::Cached;
pub use ids::{short_id, AlbumId, CollaborationId, LikeId, PlaylistId, SongId, UserId, ID_LENGTH};
pub use playlist::{
    Activity, ActivityAction, Playlist, PlaylistActivities, PlaylistSummary, PlaylistWithSongs,
};
pub use song::{CreateSong, Song, SongFilter, SongSummary};
pub use user::{CreateUser, User};
