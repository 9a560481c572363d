/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_exports")]
    pub exports: ExportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL used when building links to uploaded files
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_uploads_path")]
    pub uploads_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_access_token_expiration_seconds")]
    pub access_token_expiration_seconds: u64,

    #[serde(default = "default_refresh_token_expiration_days")]
    pub refresh_token_expiration_days: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_backend")]
    pub backend: CacheBackend,

    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Entry limit of the in-process cache
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: usize,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Redis list that export requests are pushed onto
    #[serde(default = "default_export_queue")]
    pub queue: String,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from the given file (if present) and environment
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables, e.g. SONGBOOK_AUTH__JWT_SECRET
        settings = settings.add_source(
            config::Environment::with_prefix("SONGBOOK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set SONGBOOK_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(ServerError::Config(
                "cache.ttl_seconds must be greater than zero".to_string(),
            ));
        }

        if self.cache.backend == CacheBackend::Memory && self.cache.memory_capacity == 0 {
            return Err(ServerError::Config(
                "cache.memory_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: default_public_url(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_public_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        uploads_path: default_uploads_path(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/songbook.db".to_string()
}

fn default_uploads_path() -> PathBuf {
    PathBuf::from("./data/uploads")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        access_token_expiration_seconds: default_access_token_expiration_seconds(),
        refresh_token_expiration_days: default_refresh_token_expiration_days(),
    }
}

fn default_access_token_expiration_seconds() -> u64 {
    3600
}

fn default_refresh_token_expiration_days() -> u64 {
    30
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        backend: default_cache_backend(),
        redis_url: default_redis_url(),
        ttl_seconds: default_ttl_seconds(),
        memory_capacity: default_memory_capacity(),
    }
}

fn default_cache_backend() -> CacheBackend {
    CacheBackend::Redis
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_ttl_seconds() -> u64 {
    1800
}

fn default_memory_capacity() -> usize {
    1024
}

fn default_exports() -> ExportSettings {
    ExportSettings {
        queue: default_export_queue(),
    }
}

fn default_export_queue() -> String {
    "export:playlists".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cache: default_cache(),
            exports: default_exports(),
        }
    }
}
