//! Cache-aside side channel
//!
//! Two `CacheStore` backends are provided: Redis for deployments and an
//! in-process LRU for single-node setups and tests. Both treat a miss as
//! `Ok(None)`; errors are backend failures and propagate to the caller.

mod memory_cache;
mod redis_cache;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub(crate) use redis_cache::redis_error;

use songbook_core::{AlbumId, UserId};

/// Key of the playlist listing seen by one user
pub fn playlists_key(user_id: &UserId) -> String {
    format!("playlists:{}", user_id)
}

/// Key of an album's like count
pub fn likes_key(album_id: &AlbumId) -> String {
    format!("likes:{}", album_id)
}
