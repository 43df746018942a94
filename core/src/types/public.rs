//! Payloads of the unauthenticated endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiStatus {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub online: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub timestamp: i64,
}

/// `GET /api/time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTime {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub timestamp: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub utc_datetime: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub utc_date: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub utc_time: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub utc_json: String,
}

/// Listener counters attached to stations, mounts and relays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listeners {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub total: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub unique: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub current: u32,
}

/// A mount point as listed on the public station record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountInfo {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub url: String,
    pub bitrate: Option<u32>,
    pub format: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: Listeners,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub path: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_default: bool,
}

/// A remote relay as listed on the public station record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteInfo {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub url: String,
    pub bitrate: Option<u32>,
    pub format: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: Listeners,
}

/// Public station record (`GET /api/station/{id}` and `/api/stations`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationInfo {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub shortcode: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub frontend: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backend: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub timezone: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listen_url: String,
    pub url: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub public_player_url: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub playlist_pls_url: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub playlist_m3u_url: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_public: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub mounts: Vec<MountInfo>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub remotes: Vec<RemoteInfo>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hls_enabled: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hls_is_default: bool,
    pub hls_url: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hls_listeners: u32,
}

/// Song metadata shared by now-playing, history, queue and requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub text: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub artist: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub title: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub album: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub genre: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub isrc: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub lyrics: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub custom_fields: Map<String, Value>,
}

/// Live DJ state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveInfo {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_live: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub streamer_name: String,
    pub broadcast_start: Option<i64>,
    pub art: Option<String>,
}

/// One played (or playing) song.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongHistory {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub sh_id: u64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub played_at: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub duration: u32,
    pub playlist: Option<String>,
    pub streamer: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_request: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song: Song,
    pub listeners_start: Option<u32>,
    pub listeners_end: Option<u32>,
    pub delta_total: Option<i32>,
}

/// The song on air, with progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentSong {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub sh_id: u64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub played_at: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub duration: u32,
    pub playlist: Option<String>,
    pub streamer: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_request: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song: Song,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub elapsed: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub remaining: u32,
}

/// The next queued song.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextSong {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub cued_at: i64,
    pub played_at: Option<i64>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub duration: u32,
    pub playlist: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_request: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song: Song,
}

/// Now-playing record of one station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NowPlaying {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub station: StationInfo,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: Listeners,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub live: LiveInfo,
    pub now_playing: Option<CurrentSong>,
    pub playing_next: Option<NextSong>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song_history: Vec<SongHistory>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_online: bool,
    pub cache: Option<String>,
}

/// Result of a now-playing lookup.
///
/// A lookup for one station answers with a single record, except that the
/// API falls back to the full list when the station id is unknown. Both
/// shapes are surfaced as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum NowPlayingResponse {
    Single(Box<NowPlaying>),
    All(Vec<NowPlaying>),
}

impl NowPlayingResponse {
    pub(crate) fn from_payload(payload: Value) -> Result<Self> {
        let decoded = if payload.is_array() {
            serde_json::from_value(payload).map(NowPlayingResponse::All)
        } else {
            serde_json::from_value(payload).map(|np| NowPlayingResponse::Single(Box::new(np)))
        };
        decoded.map_err(|e| Error::Deserialization(e.to_string()))
    }

    /// Every record, whichever shape was returned.
    pub fn into_vec(self) -> Vec<NowPlaying> {
        match self {
            NowPlayingResponse::Single(np) => vec![*np],
            NowPlayingResponse::All(all) => all,
        }
    }

    pub fn single(&self) -> Option<&NowPlaying> {
        match self {
            NowPlayingResponse::Single(np) => Some(np),
            NowPlayingResponse::All(_) => None,
        }
    }
}
