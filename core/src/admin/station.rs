//! Station records as managed by administrators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::Session;
use crate::endpoints::Endpoint;
use crate::enums::{string_enum, Lenient};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

string_enum! {
    pub enum FrontendType ("frontend type") {
        Icecast => "icecast",
        Shoutcast2 => "shoutcast2",
        Remote => "remote",
    }
}

string_enum! {
    pub enum BackendType ("backend type") {
        Liquidsoap => "liquidsoap",
        Disabled => "none",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStation {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub short_name: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub url: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub timezone: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_enabled: bool,
    pub frontend_type: Option<Lenient<FrontendType>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub frontend_config: Map<String, Value>,
    pub backend_type: Option<Lenient<BackendType>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backend_config: Map<String, Value>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_public_page: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_on_demand: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_requests: bool,
    pub request_delay: Option<u32>,
    pub request_threshold: Option<u32>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_streamers: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub disconnect_deactivate_streamer: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_hls: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub max_bitrate: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub max_mounts: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub max_hls_streams: u32,
    pub radio_base_dir: Option<String>,
    pub media_storage_location: Option<u32>,
    pub recordings_storage_location: Option<u32>,
    pub podcasts_storage_location: Option<u32>,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_type: Option<FrontendType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_config: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<BackendType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_config: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_public_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_on_demand: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_streamers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnect_deactivate_streamer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_hls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_mounts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hls_streams: Option<u32>,
}

impl StationFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(short_name) = &self.short_name {
            let valid = !short_name.is_empty()
                && short_name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
            if !valid {
                return Err(Error::client(format!(
                    "station short name {short_name:?} must be lower-case letters, digits, '-' or '_'"
                )));
            }
        }
        if self.enable_requests == Some(false) && self.request_delay.is_some() {
            return Err(Error::client("request_delay needs requests enabled"));
        }
        Ok(())
    }
}

impl Resource for AdminStation {
    type Context = Session;
    type Id = u32;
    const KIND: &'static str = "station";
    const COLLECTION: Endpoint = Endpoint::AdminStations;
    const ITEM: Endpoint = Endpoint::AdminStation;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for AdminStation {
    type Update = StationFields;
    const EDITABLE: &'static [&'static str] = &[
        "name",
        "short_name",
        "description",
        "genre",
        "url",
        "timezone",
        "is_enabled",
        "frontend_type",
        "frontend_config",
        "backend_type",
        "backend_config",
        "enable_public_page",
        "enable_on_demand",
        "enable_requests",
        "request_delay",
        "request_threshold",
        "enable_streamers",
        "disconnect_deactivate_streamer",
        "enable_hls",
    ];

    fn validate_update(&self, update: &StationFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for AdminStation {
    type New = StationFields;

    fn validate_new(new: &StationFields) -> Result<()> {
        if new.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(Error::client("a new station needs a name"));
        }
        new.validate()
    }
}
