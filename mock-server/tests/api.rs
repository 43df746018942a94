use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, FAULTY_STATION_ID, LOGIN_PAGE_TITLE};
use serde_json::{json, Value};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", KEY)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

// --- public ---

#[tokio::test]
async fn status_is_public() {
    let app = app(Some(KEY));
    let resp = send(
        &app,
        Request::builder().uri("/api/status").body(String::new()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["online"], true);
}

#[tokio::test]
async fn now_playing_unknown_station_falls_back_to_list() {
    let app = app(Some(KEY));
    let resp = send(&app, request("GET", "/api/nowplaying/42")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.is_array());

    let resp = send(&app, request("GET", "/api/nowplaying/1")).await;
    assert_eq!(body_json(resp).await["station"]["id"], 1);
}

#[tokio::test]
async fn unknown_station_is_404() {
    let app = app(Some(KEY));
    let resp = send(&app, request("GET", "/api/station/7")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- authentication ---

#[tokio::test]
async fn missing_key_gets_login_page() {
    let app = app(Some(KEY));
    let resp = send(
        &app,
        Request::builder()
            .uri("/api/station/1/playlists")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(LOGIN_PAGE_TITLE));
}

#[tokio::test]
async fn wrong_key_is_403() {
    let app = app(Some(KEY));
    let resp = send(
        &app,
        Request::builder()
            .uri("/api/station/1/playlists")
            .header("x-api-key", "wrong")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn no_configured_key_disables_auth() {
    let app = app(None);
    let resp = send(
        &app,
        Request::builder()
            .uri("/api/station/1/playlists")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(body_json(resp).await[0]["name"], "default");
}

// --- faults ---

#[tokio::test]
async fn faulty_station_fails_in_every_shape() {
    let app = app(Some(KEY));

    let resp = send(&app, request("GET", &format!("/api/station/{FAULTY_STATION_ID}/status"))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["type"], "SupervisorException");

    let resp = send(&app, request("GET", &format!("/api/station/{FAULTY_STATION_ID}/listeners"))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(resp).await.contains("text-muted card-text"));

    let resp = send(&app, request("GET", &format!("/api/station/{FAULTY_STATION_ID}/history"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "down for maintenance");
}

#[tokio::test]
async fn wrong_method_is_405() {
    let app = app(Some(KEY));
    let resp = send(&app, request("DELETE", "/api/status")).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- collections ---

#[tokio::test]
async fn playlist_lifecycle() {
    let app = app(Some(KEY));

    let resp = send(
        &app,
        json_request("POST", "/api/station/1/playlists", json!({"name": "Night", "weight": 2})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    let id = created["id"].as_u64().unwrap();
    assert_eq!(created["name"], "Night");

    let resp = send(
        &app,
        json_request("PUT", &format!("/api/station/1/playlist/{id}"), json!({"name": ""})),
    )
    .await;
    assert_eq!(body_json(resp).await["success"], false);

    let resp = send(
        &app,
        json_request("PUT", &format!("/api/station/1/playlist/{id}"), json!({"weight": 9})),
    )
    .await;
    assert_eq!(body_json(resp).await["success"], true);

    let resp = send(&app, request("PUT", &format!("/api/station/1/playlist/{id}/toggle"))).await;
    assert_eq!(body_json(resp).await["message"], "Playlist enabled.");

    let resp = send(&app, request("GET", &format!("/api/station/1/playlist/{id}"))).await;
    let fetched = body_json(resp).await;
    assert_eq!(fetched["name"], "Night");
    assert_eq!(fetched["weight"], 9);
    assert_eq!(fetched["is_enabled"], true);

    let resp = send(&app, request("DELETE", &format!("/api/station/1/playlist/{id}"))).await;
    assert_eq!(body_json(resp).await["success"], true);

    let resp = send(&app, request("GET", &format!("/api/station/1/playlist/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sftp_password_is_never_echoed() {
    let app = app(Some(KEY));
    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/station/1/sftp-users",
            json!({"username": "uploader", "password": "hunter2"}),
        ),
    )
    .await;
    let created = body_json(resp).await;
    assert!(created.get("password").is_none());
    assert_eq!(created["username"], "uploader");
}

#[tokio::test]
async fn episodes_need_an_existing_podcast() {
    let app = app(Some(KEY));

    let resp = send(
        &app,
        json_request("POST", "/api/station/1/podcast/nope/episodes", json!({"title": "Pilot"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(
        &app,
        json_request(
            "POST",
            "/api/station/1/podcasts",
            json!({"title": "Talk", "description": "d", "language": "en"}),
        ),
    )
    .await;
    let podcast_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = send(
        &app,
        json_request(
            "POST",
            &format!("/api/station/1/podcast/{podcast_id}/episodes"),
            json!({"title": "Pilot", "description": "first"}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, request("GET", &format!("/api/station/1/podcast/{podcast_id}/episodes"))).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}

// --- admin ---

#[tokio::test]
async fn settings_merge_on_put() {
    let app = app(Some(KEY));
    let resp = send(
        &app,
        json_request("PUT", "/api/admin/settings", json!({"instance_name": "Renamed"})),
    )
    .await;
    assert_eq!(body_json(resp).await["success"], true);

    let resp = send(&app, request("GET", "/api/admin/settings")).await;
    let settings = body_json(resp).await;
    assert_eq!(settings["instance_name"], "Renamed");
    assert_eq!(settings["history_keep_days"], 30);
}
