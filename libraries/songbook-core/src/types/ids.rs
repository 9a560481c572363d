//! ID types for Songbook entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the random part of every generated id
pub const ID_LENGTH: usize = 16;

/// Random 16-character id, used bare for join and log rows
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh id of the form `prefix-xxxxxxxxxxxxxxxx`
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, short_id()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl sqlx::Type<sqlx::Sqlite> for $name {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <String as sqlx::Type<sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<sqlx::Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx-support")]
        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $name {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
                Ok(Self(s))
            }
        }
    };
}

entity_id!(
    /// User identifier
    UserId,
    "user"
);

entity_id!(
    /// Song identifier
    SongId,
    "song"
);

entity_id!(
    /// Album identifier
    AlbumId,
    "album"
);

entity_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

entity_id!(
    /// Collaboration identifier
    CollaborationId,
    "collab"
);

entity_id!(
    /// Album like identifier
    LikeId,
    "like"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        let id = PlaylistId::generate();
        assert!(id.as_str().starts_with("playlist-"));
        assert_eq!(id.as_str().len(), "playlist-".len() + ID_LENGTH);
    }

    #[test]
    fn generation_creates_unique_ids() {
        let id1 = SongId::generate();
        let id2 = SongId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn short_id_has_fixed_length() {
        assert_eq!(short_id().len(), ID_LENGTH);
    }

    #[test]
    fn user_id_display() {
        let id = UserId::new("user-456");
        assert_eq!(format!("{}", id), "user-456");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = AlbumId::new("album-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"album-1\"");
    }
}
