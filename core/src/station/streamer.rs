//! Streamer (live DJ) accounts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::playlist::{validate_schedule, ScheduleItem};
use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Streamer {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub streamer_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streamer_password: Option<String>,
    pub display_name: Option<String>,
    pub comments: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enforce_schedule: bool,
    pub reactivate_at: Option<i64>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub schedule_items: Vec<ScheduleItem>,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StreamerFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streamer_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streamer_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_schedule: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_items: Option<Vec<ScheduleItem>>,
}

impl StreamerFields {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            streamer_username: Some(username.into()),
            streamer_password: Some(password.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(username) = &self.streamer_username {
            if username.is_empty() || username.contains(char::is_whitespace) {
                return Err(Error::client(
                    "streamer username must be non-empty and contain no whitespace",
                ));
            }
        }
        match &self.schedule_items {
            Some(items) => validate_schedule(items),
            None => Ok(()),
        }
    }
}

impl Resource for Streamer {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "streamer";
    const COLLECTION: Endpoint = Endpoint::StationStreamers;
    const ITEM: Endpoint = Endpoint::StationStreamer;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for Streamer {
    type Update = StreamerFields;
    const EDITABLE: &'static [&'static str] = &[
        "streamer_username",
        "display_name",
        "comments",
        "is_active",
        "enforce_schedule",
        "schedule_items",
    ];

    fn validate_update(&self, update: &StreamerFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for Streamer {
    type New = StreamerFields;

    fn validate_new(new: &StreamerFields) -> Result<()> {
        if new.streamer_username.is_none() || new.streamer_password.is_none() {
            return Err(Error::client("a new streamer needs a username and a password"));
        }
        new.validate()
    }
}
