/// API integration tests
/// Tests complete HTTP request/response cycles with a real database
mod common;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use common::{create_album, create_song, create_user, share, TestContext, TEST_QUEUE};
use serde_json::{json, Value};
use songbook_server::api;
use tower::util::ServiceExt;

/// Helper to create test app router
async fn create_test_app() -> (Router, TestContext) {
    let ctx = TestContext::new().await;
    let app = api::router(ctx.state.clone());
    (app, ctx)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, headers, body)
}

#[tokio::test]
async fn test_health() {
    let (app, _ctx) = create_test_app().await;

    let (status, _, body) = send(&app, get_request("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_playlists_require_authentication() {
    let (app, _ctx) = create_test_app().await;

    let (status, _, body) = send(&app, get_request("/playlists", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");

    let (status, _, _) = send(&app, get_request("/playlists", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_refresh_logout() {
    let (app, _ctx) = create_test_app().await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/users",
            None,
            json!({"username": "dicoding", "password": "secret", "fullname": "Dicoding Indonesia"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["userId"].as_str().unwrap().to_string();
    assert!(user_id.starts_with("user-"));

    // Duplicate username
    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/users",
            None,
            json!({"username": "dicoding", "password": "other", "fullname": "Someone"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");

    let (status, _, body) = send(&app, get_request(&format!("/users/{}", user_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "dicoding");
    assert!(body["data"]["user"].get("password").is_none());

    // Wrong password
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/authentications",
            None,
            json!({"username": "dicoding", "password": "wrong"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/authentications",
            None,
            json!({"username": "dicoding", "password": "secret"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let access_token = body["data"]["accessToken"].as_str().unwrap().to_string();
    let refresh_token = body["data"]["refreshToken"].as_str().unwrap().to_string();

    let (status, _, _) = send(&app, get_request("/playlists", Some(&access_token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            "/authentications",
            None,
            json!({"refreshToken": refresh_token}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["accessToken"].is_string());

    let (status, _, _) = send(
        &app,
        json_request(
            "DELETE",
            "/authentications",
            None,
            json!({"refreshToken": refresh_token}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Revoked refresh tokens no longer work
    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            "/authentications",
            None,
            json!({"refreshToken": refresh_token}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _ctx) = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/songs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_song_crud_and_validation() {
    let (app, _ctx) = create_test_app().await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/songs",
            None,
            json!({
                "title": "Yellow",
                "year": 2000,
                "performer": "Coldplay",
                "genre": "Rock",
                "duration": 266
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let song_id = body["data"]["songId"].as_str().unwrap().to_string();

    // Year out of range
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/songs",
            None,
            json!({"title": "Old", "year": 1800, "performer": "Someone", "genre": "Folk"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing performer
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/songs",
            None,
            json!({"title": "Nameless", "year": 2001, "genre": "Folk"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&app, get_request(&format!("/songs/{}", song_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["song"]["title"], "Yellow");
    assert_eq!(body["data"]["song"]["duration"], 266);

    let (_, _, body) = send(&app, get_request("/songs?title=yel", None)).await;
    assert_eq!(body["data"]["songs"].as_array().unwrap().len(), 1);

    let (_, _, body) = send(&app, get_request("/songs?performer=queen", None)).await;
    assert!(body["data"]["songs"].as_array().unwrap().is_empty());

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/songs/{}", song_id),
            None,
            json!({
                "title": "Yellow (Live)",
                "year": 2003,
                "performer": "Coldplay",
                "genre": "Rock"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/songs/{}", song_id))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, get_request(&format!("/songs/{}", song_id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_album_with_songs() {
    let (app, _ctx) = create_test_app().await;

    let (status, _, body) = send(
        &app,
        json_request("POST", "/albums", None, json!({"name": "Parachutes", "year": 2000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let album_id = body["data"]["albumId"].as_str().unwrap().to_string();

    send(
        &app,
        json_request(
            "POST",
            "/songs",
            None,
            json!({
                "title": "Yellow",
                "year": 2000,
                "performer": "Coldplay",
                "genre": "Rock",
                "albumId": album_id
            }),
        ),
    )
    .await;

    // Unknown album reference
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/songs",
            None,
            json!({
                "title": "Lost",
                "year": 2000,
                "performer": "Coldplay",
                "genre": "Rock",
                "albumId": "album-missing"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(&app, get_request(&format!("/albums/{}", album_id), None)).await;
    assert_eq!(status, StatusCode::OK);
    let album = &body["data"]["album"];
    assert_eq!(album["name"], "Parachutes");
    assert!(album["coverUrl"].is_null());
    assert_eq!(album["songs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_playlist_flow_over_http() {
    let (app, ctx) = create_test_app().await;
    let alice = create_user(&ctx.pool, "alice").await;
    let token = ctx.token_for(&alice);
    let song_id = create_song(&ctx.pool, "Viva la Vida").await;

    let (status, _, body) = send(
        &app,
        json_request("POST", "/playlists", Some(&token), json!({"name": "Roadtrip"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let playlist_id = body["data"]["playlistId"].as_str().unwrap().to_string();

    // First listing is rebuilt from the store, the second is served from cache
    let (status, headers, body) = send(&app, get_request("/playlists", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("x-data-source").is_none());
    assert_eq!(body["data"]["playlists"][0]["username"], "alice");

    let (_, headers, _) = send(&app, get_request("/playlists", Some(&token))).await;
    assert_eq!(headers["x-data-source"], "cache");

    let songs_uri = format!("/playlists/{}/songs", playlist_id);
    let (status, _, body) = send(
        &app,
        json_request("POST", &songs_uri, Some(&token), json!({"songId": song_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["playlistSongId"].is_string());

    let (status, _, body) = send(&app, get_request(&songs_uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["playlist"]["name"], "Roadtrip");
    assert_eq!(body["data"]["playlist"]["songs"][0]["title"], "Viva la Vida");

    let (status, _, _) = send(
        &app,
        json_request("DELETE", &songs_uri, Some(&token), json!({"songId": song_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        &app,
        get_request(&format!("/playlists/{}/activities", playlist_id), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["playlistId"], playlist_id.as_str());
    let activities = body["data"]["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0]["action"], "add");
    assert_eq!(activities[1]["action"], "delete");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/playlists/{}", playlist_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stranger_is_forbidden_and_collaborator_allowed() {
    let (app, ctx) = create_test_app().await;
    let alice = create_user(&ctx.pool, "alice").await;
    let bob = create_user(&ctx.pool, "bob").await;
    let mallory = create_user(&ctx.pool, "mallory").await;
    let song_id = create_song(&ctx.pool, "Clocks").await;

    let playlist_id = ctx.state.playlists.add_playlist("Roadtrip", &alice).await.unwrap();
    let songs_uri = format!("/playlists/{}/songs", playlist_id);

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &songs_uri,
            Some(&ctx.token_for(&mallory)),
            json!({"songId": song_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You are not entitled to access this resource");

    share(&ctx.pool, &playlist_id, &bob).await;
    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &songs_uri,
            Some(&ctx.token_for(&bob)),
            json!({"songId": song_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Collaborators cannot delete the playlist
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/playlists/{}", playlist_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", ctx.token_for(&bob)))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(
        &app,
        get_request("/playlists/playlist-missing/songs", Some(&ctx.token_for(&bob))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collaborations_owner_only() {
    let (app, ctx) = create_test_app().await;
    let alice = create_user(&ctx.pool, "alice").await;
    let bob = create_user(&ctx.pool, "bob").await;
    let playlist_id = ctx.state.playlists.add_playlist("Roadtrip", &alice).await.unwrap();

    let body = json!({"playlistId": playlist_id, "userId": bob});

    let (status, _, _) = send(
        &app,
        json_request("POST", "/collaborations", Some(&ctx.token_for(&bob)), body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, response) = send(
        &app,
        json_request("POST", "/collaborations", Some(&ctx.token_for(&alice)), body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(response["data"]["collaborationId"]
        .as_str()
        .unwrap()
        .starts_with("collab-"));

    let (_, _, listing) = send(&app, get_request("/playlists", Some(&ctx.token_for(&bob)))).await;
    assert_eq!(listing["data"]["playlists"].as_array().unwrap().len(), 1);

    let (status, _, _) = send(
        &app,
        json_request("DELETE", "/collaborations", Some(&ctx.token_for(&alice)), body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app,
        json_request("DELETE", "/collaborations", Some(&ctx.token_for(&alice)), body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_is_queued_for_owner() {
    let (app, ctx) = create_test_app().await;
    let alice = create_user(&ctx.pool, "alice").await;
    let bob = create_user(&ctx.pool, "bob").await;
    let playlist_id = ctx.state.playlists.add_playlist("Roadtrip", &alice).await.unwrap();
    let uri = format!("/export/playlists/{}", playlist_id);

    let (status, _, _) = send(
        &app,
        json_request("POST", &uri, Some(&ctx.token_for(&alice)), json!({"targetEmail": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &uri,
            Some(&ctx.token_for(&bob)),
            json!({"targetEmail": "bob@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(ctx.producer.messages().is_empty());

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &uri,
            Some(&ctx.token_for(&alice)),
            json!({"targetEmail": "alice@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Your request is being processed");

    let messages = ctx.producer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, TEST_QUEUE);
    let payload: Value = serde_json::from_str(&messages[0].1).unwrap();
    assert_eq!(payload["playlistId"], playlist_id.as_str());
    assert_eq!(payload["targetEmail"], "alice@example.com");
}

#[tokio::test]
async fn test_album_likes_are_cached() {
    let (app, ctx) = create_test_app().await;
    let alice = create_user(&ctx.pool, "alice").await;
    let album_id = create_album(&ctx.pool, "Viva la Vida").await;
    let likes_uri = format!("/albums/{}/likes", album_id);
    let token = ctx.token_for(&alice);

    let like = || json_request("POST", &likes_uri, Some(&token), json!({}));

    let (status, _, _) = send(&app, like()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, _) = send(&app, like()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, headers, body) = send(&app, get_request(&likes_uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes"], 1);
    assert!(headers.get("x-data-source").is_none());

    let (_, headers, body) = send(&app, get_request(&likes_uri, None)).await;
    assert_eq!(body["data"]["likes"], 1);
    assert_eq!(headers["x-data-source"], "cache");

    // Liking requires a token
    let (status, _, _) = send(&app, json_request("POST", &likes_uri, None, json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let unlike = Request::builder()
        .method("DELETE")
        .uri(&likes_uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, unlike).await;
    assert_eq!(status, StatusCode::OK);

    let (_, headers, body) = send(&app, get_request(&likes_uri, None)).await;
    assert_eq!(body["data"]["likes"], 0);
    assert!(headers.get("x-data-source").is_none());

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/albums/album-missing/likes",
            Some(&token),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart_request(uri: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "songbook-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"cover\"; filename=\"cover.png\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_cover_upload() {
    let (app, ctx) = create_test_app().await;
    let album_id = create_album(&ctx.pool, "Ghost Stories").await;
    let uri = format!("/albums/{}/covers", album_id);

    let (status, _, _) = send(&app, multipart_request(&uri, "text/plain", b"hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_big = vec![0u8; 512_001];
    let (status, _, _) = send(&app, multipart_request(&uri, "image/png", &too_big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, _, body) = send(&app, multipart_request(&uri, "image/png", b"\x89PNG fake")).await;
    assert_eq!(status, StatusCode::CREATED);
    let cover_url = body["data"]["coverUrl"].as_str().unwrap().to_string();
    assert!(cover_url.starts_with("http://localhost:5000/uploads/images/"));

    let (_, _, body) = send(&app, get_request(&format!("/albums/{}", album_id), None)).await;
    assert_eq!(body["data"]["album"]["coverUrl"], cover_url.as_str());

    // The stored file is served statically
    let path = cover_url.trim_start_matches("http://localhost:5000");
    let response = app.clone().oneshot(get_request(path, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
