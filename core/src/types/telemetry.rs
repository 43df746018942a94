//! Read-only station telemetry: listeners, schedule, requests, service state.

use serde::{Deserialize, Serialize};

use super::public::Song;

/// `GET /api/station/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationStatus {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backend_running: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub frontend_running: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub station_has_started: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub station_needs_restart: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerDevice {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_browser: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_mobile: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_bot: bool,
    pub client: Option<String>,
    pub browser_family: Option<String>,
    pub os_family: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerLocation {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// One connected listener.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listener {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub ip: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub user_agent: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hash: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub mount_is_local: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub mount_name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub connected_on: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub connected_until: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub connected_time: u64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub device: ListenerDevice,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub location: ListenerLocation,
}

/// A scheduled playlist or streamer slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "crate::types::null_default")]
    pub kind: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub title: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub start_timestamp: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub start: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub end_timestamp: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub end: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_now: bool,
}

/// A song listeners may request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestableSong {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub request_id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub request_url: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song: Song,
}

/// A system service as reported to administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub running: bool,
}

/// One entry of the permission catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionInfo {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
}

/// `GET /api/admin/permissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionCatalogue {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub global: Vec<PermissionInfo>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub station: Vec<PermissionInfo>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn listener_tolerates_missing_location() {
        let listener: Listener = serde_json::from_value(json!({
            "ip": "198.51.100.7",
            "user_agent": "VLC/3.0",
            "mount_name": "/radio.mp3",
            "connected_time": 42,
            "device": {"is_browser": false, "client": "VLC"}
        }))
        .unwrap();
        assert_eq!(listener.connected_time, 42);
        assert_eq!(listener.device.client.as_deref(), Some("VLC"));
        assert!(listener.location.city.is_none());
    }

    #[test]
    fn schedule_entry_reads_type_field() {
        let entry: ScheduleEntry = serde_json::from_value(json!({
            "id": 3, "type": "playlist", "name": "Morning", "is_now": true
        }))
        .unwrap();
        assert_eq!(entry.kind, "playlist");
        assert!(entry.is_now);
    }
}
