/// Songbook Server - music catalog REST backend
use clap::{Parser, Subcommand};
use songbook_core::{CacheStore, CreateUser};
use songbook_server::{
    api,
    config::{CacheBackend, ServerConfig},
    services::{
        AuthService, ExportProducer, ExportService, FileStorage, MemoryCache, RedisCache,
        RedisExportProducer,
    },
    state::AppState,
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "songbook-server")]
#[command(about = "Songbook music catalog server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long)]
        fullname: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songbook_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let config = match config {
                Some(path) => ServerConfig::load_from(Path::new(&path))?,
                None => ServerConfig::load()?,
            };
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            fullname,
        } => {
            add_user(&username, &password, &fullname).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

/// Open the database, creating its directory on first run, and migrate it
async fn open_database(database_url: &str) -> anyhow::Result<sqlx::SqlitePool> {
    if let Some(file) = database_url.strip_prefix("sqlite://") {
        if let Some(parent) = Path::new(file).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    let pool = songbook_storage::create_pool(database_url).await?;
    songbook_storage::run_migrations(&pool).await?;
    Ok(pool)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Songbook Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = open_database(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    // Initialize file storage
    let file_storage = FileStorage::new(config.storage.uploads_path.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!("File storage initialized");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_token_expiration_seconds,
        config.auth.refresh_token_expiration_days,
    ));
    tracing::info!("Auth service initialized");

    // Cache and export queue; with Redis caching both share one connection
    let (cache, producer): (Arc<dyn CacheStore>, Arc<dyn ExportProducer>) =
        match config.cache.backend {
            CacheBackend::Redis => {
                let redis = RedisCache::connect(&config.cache.redis_url).await?;
                let producer = RedisExportProducer::new(redis.connection());
                (Arc::new(redis), Arc::new(producer))
            }
            CacheBackend::Memory => {
                let producer = RedisExportProducer::connect(&config.cache.redis_url).await?;
                (
                    Arc::new(MemoryCache::new(config.cache.memory_capacity)),
                    Arc::new(producer),
                )
            }
        };
    tracing::info!("Cache backend: {:?}", config.cache.backend);

    let exports = Arc::new(ExportService::new(producer, config.exports.queue.clone()));

    // Build application state
    let app_state = AppState::new(
        pool,
        auth_service,
        file_storage,
        cache,
        exports,
        config.cache.ttl(),
        config.server.public_url.clone(),
    );

    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(username: &str, password: &str, fullname: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = open_database(&config.storage.database_url).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.access_token_expiration_seconds,
        config.auth.refresh_token_expiration_days,
    );
    let password_hash = auth_service.hash_password(password)?;

    let user_id = songbook_storage::users::create(
        &pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
            fullname: fullname.to_string(),
        },
    )
    .await?;

    println!("Created user {} ({})", username, user_id);
    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = open_database(&config.storage.database_url).await?;

    let users = songbook_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.username, user.fullname);
    }

    Ok(())
}
