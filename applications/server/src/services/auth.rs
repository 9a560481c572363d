/// Credentials: bcrypt password hashes and HS256 bearer tokens
///
/// Access tokens are short-lived. Refresh tokens are long-lived, and the
/// `authentications` table keeps the ones still honored so a logout can
/// revoke them before they expire.
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use songbook_core::{SongbookError, UserId};
use uuid::Uuid;

/// JWT payload shared by both token kinds
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenType,
    /// Random per token; two tokens minted in the same second still differ
    #[serde(default)]
    pub jti: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Longest lifetime a token may be configured with (about a century)
const MAX_LIFETIME_SECONDS: u64 = 100 * 365 * 24 * 3600;

fn capped_seconds(seconds: u64) -> Duration {
    Duration::seconds(i64::try_from(seconds.min(MAX_LIFETIME_SECONDS)).unwrap_or_default())
}

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl AuthService {
    pub fn new(secret: String, access_lifetime_seconds: u64, refresh_lifetime_days: u64) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_lifetime: capped_seconds(access_lifetime_seconds),
            refresh_lifetime: capped_seconds(refresh_lifetime_days.saturating_mul(24 * 3600)),
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
    }

    /// `Ok(false)` for a wrong password; `Err` only for an unreadable hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }

    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.issue(user_id, TokenType::Access, self.access_lifetime)
    }

    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.issue(user_id, TokenType::Refresh, self.refresh_lifetime)
    }

    /// User id carried by a valid, unexpired access token
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify(token, TokenType::Access)
    }

    /// User id carried by a valid, unexpired refresh token.
    ///
    /// Whether the token was revoked is a storage question and is not checked here.
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify(token, TokenType::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<UserId> {
        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?
                .claims;

        if claims.token_type != expected {
            return Err(SongbookError::authentication("Invalid token type").into());
        }
        Ok(UserId::new(claims.sub))
    }

    fn issue(&self, user_id: &UserId, token_type: TokenType, lifetime: Duration) -> Result<String> {
        let issued_at = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (issued_at + lifetime).timestamp(),
            iat: issued_at.timestamp(),
            token_type,
            jti: Uuid::new_v4().to_string(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(ServerError::from)
    }
}
