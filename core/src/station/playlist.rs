//! Playlists and their schedules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::enums::{string_enum, DayOfWeek, Lenient};
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::resource::{succeeded, Creatable, Editable, Handle, Resource};

string_enum! {
    /// When a playlist plays.
    pub enum PlaylistType ("playlist type") {
        Default => "default",
        OncePerXSongs => "once_per_x_songs",
        OncePerXMinutes => "once_per_x_minutes",
        OncePerHour => "once_per_hour",
        Custom => "custom",
    }
}

string_enum! {
    /// Where a playlist's tracks come from.
    pub enum PlaylistSource ("playlist source") {
        Songs => "songs",
        RemoteUrl => "remote_url",
    }
}

string_enum! {
    pub enum PlaylistOrder ("playlist order") {
        Shuffle => "shuffle",
        Random => "random",
        Sequential => "sequential",
    }
}

string_enum! {
    pub enum RemoteType ("remote playlist type") {
        Stream => "stream",
        Playlist => "playlist",
        Other => "other",
    }
}

/// A time window, as used by playlist and streamer schedules.
///
/// Times are `HHMM` integers (`930` is 09:30, `2359` is 23:59).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub start_time: u16,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub end_time: u16,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub days: Vec<DayOfWeek>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub loop_once: bool,
}

impl ScheduleItem {
    pub fn new(start_time: u16, end_time: u16, days: Vec<DayOfWeek>) -> Self {
        Self {
            start_time,
            end_time,
            days,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for time in [self.start_time, self.end_time] {
            if time > 2359 || time % 100 > 59 {
                return Err(Error::client(format!(
                    "{time} is not a valid HHMM time of day"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_schedule(items: &[ScheduleItem]) -> Result<()> {
    items.iter().try_for_each(ScheduleItem::validate)
}

/// A station playlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playlist {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<Lenient<PlaylistType>>,
    pub source: Option<Lenient<PlaylistSource>>,
    pub order: Option<Lenient<PlaylistOrder>>,
    pub remote_url: Option<String>,
    pub remote_type: Option<Lenient<RemoteType>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub remote_buffer: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_enabled: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_jingle: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub play_per_songs: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub play_per_minutes: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub play_per_hour_minute: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub weight: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub include_in_requests: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub include_in_on_demand: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub include_in_automation: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub avoid_duplicates: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backend_options: Vec<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub schedule_items: Vec<ScheduleItem>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub num_songs: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub total_length: u64,
    pub links: Value,
}

/// Writable playlist fields. Used for edits, and for creation where `name`
/// is required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PlaylistType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PlaylistSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<PlaylistOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_type: Option<RemoteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_buffer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_jingle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_per_songs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_per_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_per_hour_minute: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_on_demand: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_automation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_duplicates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_items: Option<Vec<ScheduleItem>>,
}

impl PlaylistFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn validate(&self, current_remote_url: Option<&str>) -> Result<()> {
        if let Some(minute) = self.play_per_hour_minute {
            if minute > 59 {
                return Err(Error::client("play_per_hour_minute must be between 0 and 59"));
            }
        }
        if let Some(weight) = self.weight {
            if !(1..=25).contains(&weight) {
                return Err(Error::client("weight must be between 1 and 25"));
            }
        }
        let remote_url = self.remote_url.as_deref().or(current_remote_url);
        if self.source == Some(PlaylistSource::RemoteUrl) && remote_url.map_or(true, str::is_empty)
        {
            return Err(Error::client("a remote_url playlist needs a remote_url"));
        }
        if let Some(items) = &self.schedule_items {
            validate_schedule(items)?;
        }
        Ok(())
    }
}

impl Resource for Playlist {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "playlist";
    const COLLECTION: Endpoint = Endpoint::StationPlaylists;
    const ITEM: Endpoint = Endpoint::StationPlaylist;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for Playlist {
    type Update = PlaylistFields;
    const EDITABLE: &'static [&'static str] = &[
        "name",
        "type",
        "source",
        "order",
        "remote_url",
        "remote_type",
        "remote_buffer",
        "is_enabled",
        "is_jingle",
        "play_per_songs",
        "play_per_minutes",
        "play_per_hour_minute",
        "weight",
        "include_in_requests",
        "include_in_on_demand",
        "include_in_automation",
        "avoid_duplicates",
        "backend_options",
        "schedule_items",
    ];

    fn validate_update(&self, update: &PlaylistFields) -> Result<()> {
        update.validate(self.remote_url.as_deref())
    }
}

impl Creatable for Playlist {
    type New = PlaylistFields;

    fn validate_new(new: &PlaylistFields) -> Result<()> {
        if new.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(Error::client("a new playlist needs a name"));
        }
        new.validate(None)
    }
}

impl Handle<Playlist> {
    /// Flip `is_enabled`; the local flag follows on success.
    pub fn toggle(&mut self) -> Result<Value> {
        let response = self.send_to(Endpoint::StationPlaylistToggle, HttpMethod::Put, None)?;
        if succeeded(&response) {
            if let Some(playlist) = self.data_mut() {
                playlist.is_enabled = !playlist.is_enabled;
            }
        }
        Ok(response)
    }

    /// Reshuffle the playback queue of a shuffled playlist.
    pub fn reshuffle(&self) -> Result<Value> {
        self.send_to(Endpoint::StationPlaylistReshuffle, HttpMethod::Put, None)
    }
}
