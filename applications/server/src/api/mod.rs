/// API route modules
pub mod albums;
pub mod authentications;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod payload;
pub mod playlists;
pub mod response;
pub mod songs;
pub mod users;

use crate::{middleware, services::file_storage::IMAGES_DIR, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use payload::Payload;
pub use response::Envelope;

/// Build the full HTTP router
pub fn router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        // Users
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        // Authentications
        .route(
            "/authentications",
            post(authentications::login)
                .put(authentications::refresh)
                .delete(authentications::logout),
        )
        // Songs
        .route("/songs", post(songs::create_song).get(songs::list_songs))
        .route(
            "/songs/:id",
            get(songs::get_song)
                .put(songs::update_song)
                .delete(songs::delete_song),
        )
        // Albums
        .route("/albums", post(albums::create_album))
        .route(
            "/albums/:id",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        .route("/albums/:id/covers", post(albums::upload_cover))
        .route("/albums/:id/likes", get(albums::get_likes));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Playlists
        .route(
            "/playlists",
            post(playlists::create_playlist).get(playlists::list_playlists),
        )
        .route(
            "/playlists/:id",
            axum::routing::delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            post(playlists::add_song)
                .get(playlists::get_songs)
                .delete(playlists::remove_song),
        )
        .route("/playlists/:id/activities", get(playlists::get_activities))
        // Collaborations
        .route(
            "/collaborations",
            post(collaborations::add_collaboration).delete(collaborations::delete_collaboration),
        )
        // Exports
        .route("/export/playlists/:id", post(exports::export_playlist))
        // Album likes
        .route(
            "/albums/:id/likes",
            post(albums::like_album).delete(albums::unlike_album),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    let uploads = ServeDir::new(app_state.file_storage.images_dir());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(&format!("/uploads/{}", IMAGES_DIR), uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
