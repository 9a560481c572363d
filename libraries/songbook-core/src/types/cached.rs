//! Cache-aside read results

use serde::Serialize;

/// Value returned by a cache-aside read, tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cached<T> {
    /// The value itself
    pub value: T,
    /// `true` when served from the cache, `false` when rebuilt from the store
    pub cached: bool,
}

impl<T> Cached<T> {
    /// Value served from the cache
    pub fn hit(value: T) -> Self {
        Self {
            value,
            cached: true,
        }
    }

    /// Value rebuilt from the relational store
    pub fn miss(value: T) -> Self {
        Self {
            value,
            cached: false,
        }
    }
}
