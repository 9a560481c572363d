//! User domain type

use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// User account (the password hash never leaves the storage layer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique across the catalog
    pub username: String,

    /// Display name
    pub fullname: String,
}

/// Data for registering a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Display name
    pub fullname: String,
}
