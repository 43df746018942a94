//! In-process imitation of the AzuraCast HTTP API.
//!
//! Serves the public endpoints, one station (`STATION_ID`) with in-memory
//! playlists, SFTP users, webhooks and podcasts, and a few admin endpoints.
//! Responses mimic the upstream quirks the client has to classify:
//!
//! - a protected route without `X-API-Key` answers 200 with the login page,
//!   a wrong key answers 403;
//! - `FAULTY_STATION_ID` fails on purpose: its status is a JSON 500, its
//!   listeners an HTML 500 error page, its history a 200 plain-text body;
//! - `GET /api/nowplaying/{id}` for an unknown id answers with the full list;
//! - a PUT blanking a required field answers `"success": false`;
//! - an unsupported method on a known route answers 405.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const STATION_ID: u32 = 1;
pub const FAULTY_STATION_ID: u32 = 99;
pub const LOGIN_PAGE_TITLE: &str = "Log In - AzuraCast";

type Record = Map<String, Value>;
type Params = HashMap<String, String>;

/// Resource collections kept in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Playlists,
    SftpUsers,
    Webhooks,
    Podcasts,
    Episodes,
}

impl Collection {
    /// Field that must be a non-empty string.
    fn required_field(self) -> &'static str {
        match self {
            Collection::Playlists => "name",
            Collection::SftpUsers => "username",
            Collection::Webhooks => "type",
            Collection::Podcasts | Collection::Episodes => "title",
        }
    }

    fn id_param(self) -> &'static str {
        match self {
            Collection::Episodes => "episode_id",
            _ => "id",
        }
    }

    fn uses_uuid(self) -> bool {
        matches!(self, Collection::Podcasts | Collection::Episodes)
    }

    /// Write-only fields never echoed back.
    fn secret_fields(self) -> &'static [&'static str] {
        match self {
            Collection::SftpUsers => &["password"],
            _ => &[],
        }
    }

    /// Key of the owner the records live under, e.g. `station/1/playlists`.
    fn owner(self, params: &Params) -> Option<String> {
        let station = params.get("station_id")?;
        match self {
            Collection::Episodes => Some(format!("station/{station}/podcast/{}/episodes", params.get("id")?)),
            other => Some(format!("station/{station}/{other:?}")),
        }
    }
}

#[derive(Debug, Default)]
pub struct Db {
    records: BTreeMap<String, BTreeMap<String, Record>>,
    next_id: u32,
    settings: Record,
}

impl Db {
    fn seeded() -> Self {
        let mut db = Db {
            next_id: 1,
            settings: json!({
                "instance_name": "Mock Radio",
                "history_keep_days": 30,
                "public_theme": "dark",
                "geolite_license_key": ""
            })
            .as_object()
            .cloned()
            .unwrap_or_default(),
            ..Default::default()
        };
        let owner = format!("station/{STATION_ID}/{:?}", Collection::Playlists);
        let id = db.allocate(Collection::Playlists);
        let playlist = json!({
            "id": id.parse::<u32>().unwrap_or_default(),
            "name": "default",
            "type": "default",
            "source": "songs",
            "order": "shuffle",
            "is_enabled": true,
            "weight": 3,
            "schedule_items": []
        });
        if let Value::Object(record) = playlist {
            db.records.entry(owner).or_default().insert(id, record);
        }
        db
    }

    fn allocate(&mut self, collection: Collection) -> String {
        if collection.uses_uuid() {
            return Uuid::new_v4().to_string();
        }
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

#[derive(Clone)]
pub struct AppState {
    api_key: Option<Arc<str>>,
    db: Arc<RwLock<Db>>,
}

impl AppState {
    /// `api_key = None` disables authentication.
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
            db: Arc::new(RwLock::new(Db::seeded())),
        }
    }
}

pub fn app(api_key: Option<&str>) -> Router {
    let state = AppState::new(api_key);

    let public = Router::new()
        .route("/api/status", get(status))
        .route("/api/time", get(time))
        .route("/api/nowplaying", get(now_playing_all))
        .route("/api/nowplaying/{station_id}", get(now_playing_one))
        .route("/api/stations", get(stations))
        .route("/api/station/{station_id}", get(station));

    let protected = Router::new()
        .route("/api/station/{station_id}/status", get(station_status))
        .route("/api/station/{station_id}/listeners", get(listeners))
        .route("/api/station/{station_id}/history", get(history))
        .route("/api/station/{station_id}/restart", post(service_action))
        .route("/api/station/{station_id}/frontend/{action}", post(service_action))
        .route("/api/station/{station_id}/backend/{action}", post(service_action))
        .route("/api/station/{station_id}/playlist/{id}/toggle", put(toggle_playlist))
        .merge(collection_routes(Collection::Playlists, "playlists", "playlist/{id}"))
        .merge(collection_routes(Collection::SftpUsers, "sftp-users", "sftp-user/{id}"))
        .merge(collection_routes(Collection::Webhooks, "webhooks", "webhook/{id}"))
        .merge(collection_routes(Collection::Podcasts, "podcasts", "podcast/{id}"))
        .merge(collection_routes(
            Collection::Episodes,
            "podcast/{id}/episodes",
            "podcast/{id}/episode/{episode_id}",
        ))
        .route("/api/admin/settings", get(get_settings).put(put_settings))
        .route("/api/admin/permissions", get(permissions))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    public.merge(protected).with_state(state)
}

pub async fn run(listener: TcpListener, api_key: Option<&str>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn collection_routes(collection: Collection, list: &str, item: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/api/station/{{station_id}}/{list}"),
            get(move |State(state): State<AppState>, Path(params): Path<Params>| {
                list_records(state, params, collection)
            })
            .post(
                move |State(state): State<AppState>,
                      Path(params): Path<Params>,
                      Json(body): Json<Record>| {
                    create_record(state, params, collection, body)
                },
            ),
        )
        .route(
            &format!("/api/station/{{station_id}}/{item}"),
            get(move |State(state): State<AppState>, Path(params): Path<Params>| {
                get_record(state, params, collection)
            })
            .put(
                move |State(state): State<AppState>,
                      Path(params): Path<Params>,
                      Json(body): Json<Record>| {
                    update_record(state, params, collection, body)
                },
            )
            .delete(move |State(state): State<AppState>, Path(params): Path<Params>| {
                delete_record(state, params, collection)
            }),
        )
}

// --- authentication ---

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };
    let supplied = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok());
    match supplied {
        Some(key) if key == expected => next.run(request).await,
        Some(_) => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "code": 403,
                "type": "PermissionDeniedException",
                "message": "You do not have permission to access this portion of the site.",
                "success": false
            })),
        )
            .into_response(),
        None => (StatusCode::OK, Html(login_page())).into_response(),
    }
}

pub fn login_page() -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{LOGIN_PAGE_TITLE}</title></head>\
         <body><form method=\"post\"><input name=\"username\"><input name=\"password\" type=\"password\"></form></body></html>"
    )
}

pub fn error_page(exception: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Error - AzuraCast</title></head><body>\
         <div class=\"card\"><div class=\"card-body\">\
         <h4 class=\"card-title\">{message}</h4>\
         <p class=\"text-muted card-text\">src/{exception}.php : 88</p>\
         </div></div></body></html>"
    )
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": 404,
            "type": "NotFoundException",
            "message": "Record not found.",
            "success": false
        })),
    )
        .into_response()
}

fn station_id(params: &Params) -> Option<u32> {
    params.get("station_id")?.parse().ok()
}

fn known_station(params: &Params) -> bool {
    station_id(params) == Some(STATION_ID)
}

// --- public ---

async fn status() -> Json<Value> {
    Json(json!({"online": true, "timestamp": 1_700_000_000}))
}

async fn time() -> Json<Value> {
    Json(json!({
        "timestamp": 1_700_000_000,
        "utc_datetime": "2023-11-14 22:13:20",
        "utc_date": "November 14, 2023",
        "utc_time": "10:13pm",
        "utc_json": "2023-11-14T22:13:20+00:00"
    }))
}

fn station_record(id: u32) -> Value {
    json!({
        "id": id,
        "name": "Radio One",
        "shortcode": "radio_one",
        "description": "Mock station",
        "frontend": "icecast",
        "backend": "liquidsoap",
        "timezone": "UTC",
        "listen_url": "http://localhost:8000/radio.mp3",
        "is_public": true,
        "mounts": [{
            "id": 1, "name": "/radio.mp3", "url": "http://localhost:8000/radio.mp3",
            "bitrate": 128, "format": "mp3",
            "listeners": {"total": 5, "unique": 4, "current": 4},
            "path": "/radio.mp3", "is_default": true
        }],
        "remotes": [],
        "hls_enabled": false
    })
}

fn now_playing_record(id: u32) -> Value {
    json!({
        "station": station_record(id),
        "listeners": {"total": 5, "unique": 4, "current": 4},
        "live": {"is_live": false, "streamer_name": ""},
        "now_playing": {
            "sh_id": 100, "played_at": 1_700_000_000, "duration": 200, "elapsed": 50, "remaining": 150,
            "playlist": "default", "is_request": false,
            "song": {"id": "s1", "text": "Mock Artist - Mock Song", "artist": "Mock Artist", "title": "Mock Song"}
        },
        "song_history": [],
        "is_online": true
    })
}

async fn now_playing_all() -> Json<Value> {
    Json(json!([now_playing_record(STATION_ID)]))
}

async fn now_playing_one(Path(params): Path<Params>) -> Json<Value> {
    if known_station(&params) {
        Json(now_playing_record(STATION_ID))
    } else {
        Json(json!([now_playing_record(STATION_ID)]))
    }
}

async fn stations() -> Json<Value> {
    Json(json!([station_record(STATION_ID)]))
}

async fn station(Path(params): Path<Params>) -> Response {
    match station_id(&params) {
        Some(id @ (STATION_ID | FAULTY_STATION_ID)) => Json(station_record(id)).into_response(),
        _ => not_found(),
    }
}

// --- station control and telemetry ---

async fn station_status(Path(params): Path<Params>) -> Response {
    match station_id(&params) {
        Some(STATION_ID) => Json(json!({
            "backend_running": true,
            "frontend_running": true,
            "station_has_started": true,
            "station_needs_restart": false
        }))
        .into_response(),
        Some(FAULTY_STATION_ID) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": 500,
                "type": "SupervisorException",
                "message": "Backend process is not running.",
                "success": false
            })),
        )
            .into_response(),
        _ => not_found(),
    }
}

async fn listeners(Path(params): Path<Params>) -> Response {
    match station_id(&params) {
        Some(STATION_ID) => Json(json!([{
            "ip": "203.0.113.7",
            "user_agent": "VLC/3.0",
            "hash": "abc",
            "mount_is_local": true,
            "mount_name": "/radio.mp3",
            "connected_on": 1_700_000_000,
            "connected_time": 120,
            "location": {"description": "Paris, France", "country": "FR"}
        }]))
        .into_response(),
        Some(FAULTY_STATION_ID) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(error_page("StationUnavailableException", "Station is offline.")),
        )
            .into_response(),
        _ => not_found(),
    }
}

async fn history(Path(params): Path<Params>) -> Response {
    match station_id(&params) {
        Some(STATION_ID) => Json(json!([])).into_response(),
        Some(FAULTY_STATION_ID) => (StatusCode::OK, "down for maintenance").into_response(),
        _ => not_found(),
    }
}

async fn service_action(Path(params): Path<Params>) -> Response {
    if !known_station(&params) {
        return not_found();
    }
    let message = match params.get("action").map(String::as_str) {
        None => "Station restarted.".to_string(),
        Some(action @ ("start" | "stop" | "restart" | "skip")) => format!("Service {action} requested."),
        Some(other) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "code": 500,
                    "type": "InvalidArgumentException",
                    "message": format!("Invalid action: {other}"),
                    "success": false
                })),
            )
                .into_response()
        }
    };
    Json(json!({"success": true, "message": message})).into_response()
}

// --- generic collections ---

async fn list_records(state: AppState, params: Params, collection: Collection) -> Response {
    let Some(owner) = collection.owner(&params).filter(|_| known_station(&params)) else {
        return not_found();
    };
    let db = state.db.read().await;
    let records: Vec<&Record> = db
        .records
        .get(&owner)
        .map(|records| records.values().collect())
        .unwrap_or_default();
    Json(json!(records)).into_response()
}

async fn get_record(state: AppState, params: Params, collection: Collection) -> Response {
    let (Some(owner), Some(id)) = (collection.owner(&params), params.get(collection.id_param())) else {
        return not_found();
    };
    let db = state.db.read().await;
    match db.records.get(&owner).and_then(|records| records.get(id)) {
        Some(record) => Json(record.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_record(state: AppState, params: Params, collection: Collection, mut body: Record) -> Response {
    let Some(owner) = collection.owner(&params).filter(|_| known_station(&params)) else {
        return not_found();
    };
    if blank(&body, collection.required_field()) != Some(false) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "code": 400,
                "type": "ValidationException",
                "message": format!("{}: This value should not be blank.", collection.required_field()),
                "success": false
            })),
        )
            .into_response();
    }
    if collection == Collection::Episodes {
        let podcasts = format!("station/{}/{:?}", STATION_ID, Collection::Podcasts);
        let podcast_exists = {
            let db = state.db.read().await;
            params
                .get("id")
                .is_some_and(|pid| db.records.get(&podcasts).is_some_and(|p| p.contains_key(pid)))
        };
        if !podcast_exists {
            return not_found();
        }
    }

    let mut db = state.db.write().await;
    let id = db.allocate(collection);
    let id_value = match id.parse::<u32>() {
        Ok(n) if !collection.uses_uuid() => json!(n),
        _ => json!(id),
    };
    body.insert("id".into(), id_value);
    for secret in collection.secret_fields() {
        body.remove(*secret);
    }
    db.records.entry(owner).or_default().insert(id, body.clone());
    Json(body).into_response()
}

async fn update_record(state: AppState, params: Params, collection: Collection, body: Record) -> Response {
    let (Some(owner), Some(id)) = (collection.owner(&params), params.get(collection.id_param())) else {
        return not_found();
    };
    let mut db = state.db.write().await;
    let Some(record) = db.records.get_mut(&owner).and_then(|records| records.get_mut(id)) else {
        return not_found();
    };
    let required = collection.required_field();
    if blank(&body, required) == Some(true) {
        return Json(json!({
            "success": false,
            "message": format!("{required}: This value should not be blank."),
            "formatted_message": format!("<b>{required}</b>: This value should not be blank.")
        }))
        .into_response();
    }
    for (key, value) in body {
        if key != "id" && !collection.secret_fields().contains(&key.as_str()) {
            record.insert(key, value);
        }
    }
    Json(json!({"success": true, "message": "Changes saved successfully."})).into_response()
}

async fn delete_record(state: AppState, params: Params, collection: Collection) -> Response {
    let (Some(owner), Some(id)) = (collection.owner(&params), params.get(collection.id_param())) else {
        return not_found();
    };
    let mut db = state.db.write().await;
    match db.records.get_mut(&owner).and_then(|records| records.remove(id)) {
        Some(_) => Json(json!({"success": true, "message": "Record deleted successfully."})).into_response(),
        None => not_found(),
    }
}

/// `Some(true)` when `field` is present but empty, `None` when absent.
fn blank(body: &Record, field: &str) -> Option<bool> {
    body.get(field)
        .map(|value| value.as_str().map_or(value.is_null(), str::is_empty))
}

async fn toggle_playlist(State(state): State<AppState>, Path(params): Path<Params>) -> Response {
    let (Some(owner), Some(id)) = (Collection::Playlists.owner(&params), params.get("id")) else {
        return not_found();
    };
    let mut db = state.db.write().await;
    let Some(record) = db.records.get_mut(&owner).and_then(|records| records.get_mut(id)) else {
        return not_found();
    };
    let enabled = !record.get("is_enabled").and_then(Value::as_bool).unwrap_or(false);
    record.insert("is_enabled".into(), json!(enabled));
    let message = if enabled { "Playlist enabled." } else { "Playlist disabled." };
    Json(json!({"success": true, "message": message})).into_response()
}

// --- admin ---

async fn get_settings(State(state): State<AppState>) -> Json<Record> {
    Json(state.db.read().await.settings.clone())
}

async fn put_settings(State(state): State<AppState>, Json(body): Json<Record>) -> Json<Value> {
    state.db.write().await.settings.extend(body);
    Json(json!({"success": true, "message": "Changes saved successfully."}))
}

async fn permissions() -> Json<Value> {
    Json(json!({
        "global": [
            {"id": "administer all", "name": "All Permissions"},
            {"id": "administer settings", "name": "Administer Settings"}
        ],
        "station": [
            {"id": "administer all", "name": "All Permissions"},
            {"id": "manage station media", "name": "Manage Station Media"}
        ]
    }))
}
