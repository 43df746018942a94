//! Remote relays: external servers the station broadcasts to or relays from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::enums::{string_enum, AudioFormat, Bitrate, Lenient};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};
use crate::types::Listeners;

string_enum! {
    pub enum RemoteServerType ("remote server type") {
        Icecast => "icecast",
        Shoutcast1 => "shoutcast1",
        Shoutcast2 => "shoutcast2",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteRelay {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    pub display_name: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_visible_on_public_pages: bool,
    #[serde(rename = "type")]
    pub kind: Option<Lenient<RemoteServerType>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_editable: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_autodj: bool,
    pub autodj_format: Option<Lenient<AudioFormat>>,
    pub autodj_bitrate: Option<Lenient<Bitrate>>,
    pub custom_listen_url: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub url: String,
    pub mount: Option<String>,
    pub admin_password: Option<String>,
    pub source_port: Option<u16>,
    pub source_mount: Option<String>,
    pub source_username: Option<String>,
    pub source_password: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_public: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: Listeners,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RemoteRelayFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible_on_public_pages: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RemoteServerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_autodj: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodj_format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodj_bitrate: Option<Bitrate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_listen_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_mount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl RemoteRelayFields {
    pub fn new(kind: RemoteServerType, url: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

impl Resource for RemoteRelay {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "remote relay";
    const COLLECTION: Endpoint = Endpoint::StationRemotes;
    const ITEM: Endpoint = Endpoint::StationRemote;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for RemoteRelay {
    type Update = RemoteRelayFields;
    const EDITABLE: &'static [&'static str] = &[
        "display_name",
        "is_visible_on_public_pages",
        "type",
        "enable_autodj",
        "autodj_format",
        "autodj_bitrate",
        "custom_listen_url",
        "url",
        "mount",
        "admin_password",
        "source_port",
        "source_mount",
        "source_username",
        "source_password",
        "is_public",
    ];

    fn validate_update(&self, _update: &RemoteRelayFields) -> Result<()> {
        if !self.is_editable {
            return Err(Error::client(format!(
                "remote relay {} is managed by the system and cannot be edited",
                self.id
            )));
        }
        Ok(())
    }
}

impl Creatable for RemoteRelay {
    type New = RemoteRelayFields;

    fn validate_new(new: &RemoteRelayFields) -> Result<()> {
        if new.kind.is_none() {
            return Err(Error::client("a new remote relay needs a server type"));
        }
        if new.url.as_deref().map_or(true, |u| !u.contains("://")) {
            return Err(Error::client("a new remote relay needs an absolute url"));
        }
        Ok(())
    }
}
