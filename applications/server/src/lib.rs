//! Songbook Server Library
//!
//! REST backend for the Songbook music catalog: songs, albums, playlists with
//! collaborators, album likes, cover uploads and queued playlist exports.
//!
//! This library exposes the router and services so integration tests can
//! drive them without binding a socket.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, FileStorage, PlaylistService};
pub use state::AppState;
