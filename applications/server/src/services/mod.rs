/// Server services
pub mod album_likes;
pub mod auth;
pub mod cache;
pub mod collaborations;
pub mod exports;
pub mod file_storage;
pub mod playlists;
pub mod songs;

pub use album_likes::AlbumLikeService;
pub use auth::AuthService;
pub use cache::{MemoryCache, RedisCache};
pub use collaborations::CollaborationService;
pub use exports::{ExportProducer, ExportService, RedisExportProducer};
pub use file_storage::FileStorage;
pub use playlists::PlaylistService;
pub use songs::SongService;
