//! Local mount points of the station's broadcast frontend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::enums::{AudioFormat, Bitrate, Lenient};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};
use crate::types::Listeners;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mount {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub display_name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_visible_on_public_pages: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_default: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_public: bool,
    pub fallback_mount: Option<String>,
    pub relay_url: Option<String>,
    pub authhash: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub max_listener_duration: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_autodj: bool,
    pub autodj_format: Option<Lenient<AudioFormat>>,
    pub autodj_bitrate: Option<Lenient<Bitrate>>,
    pub custom_listen_url: Option<String>,
    pub intro_path: Option<String>,
    pub frontend_config: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: Listeners,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MountFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible_on_public_pages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_mount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authhash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_listener_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_autodj: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodj_format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autodj_bitrate: Option<Bitrate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_listen_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_config: Option<String>,
}

impl MountFields {
    /// `name` is the mount path and must start with `/`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if !name.starts_with('/') || name.len() < 2 {
                return Err(Error::client(format!(
                    "mount name {name:?} must be a path such as /radio.mp3"
                )));
            }
        }
        Ok(())
    }
}

impl Resource for Mount {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "mount";
    const COLLECTION: Endpoint = Endpoint::StationMounts;
    const ITEM: Endpoint = Endpoint::StationMount;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for Mount {
    type Update = MountFields;
    const EDITABLE: &'static [&'static str] = &[
        "name",
        "display_name",
        "is_visible_on_public_pages",
        "is_default",
        "is_public",
        "fallback_mount",
        "relay_url",
        "authhash",
        "max_listener_duration",
        "enable_autodj",
        "autodj_format",
        "autodj_bitrate",
        "custom_listen_url",
        "frontend_config",
    ];

    fn validate_update(&self, update: &MountFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for Mount {
    type New = MountFields;

    fn validate_new(new: &MountFields) -> Result<()> {
        if new.name.is_none() {
            return Err(Error::client("a new mount needs a name"));
        }
        new.validate()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::testing::ScriptedTransport;
    use crate::resource::{create, tests::station_with, Handle};

    #[test]
    fn mount_name_must_be_a_path() {
        let transport = ScriptedTransport::new();
        let station = station_with(&transport);
        let err = create::<Mount>(&station, &MountFields::named("radio.mp3")).unwrap_err();
        assert!(matches!(err, Error::Client(_)));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn edit_sends_bitrate_as_number() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": true}));
        let data: Mount = serde_json::from_value(json!({
            "id": 2, "name": "/radio.mp3", "enable_autodj": true,
            "autodj_format": "mp3", "autodj_bitrate": 128
        }))
        .unwrap();
        let mut handle = Handle::new(station_with(&transport), data);

        handle
            .edit(MountFields {
                autodj_format: Some(AudioFormat::Opus),
                autodj_bitrate: Some(Bitrate::Kbps96),
                ..Default::default()
            })
            .unwrap();

        let body = transport.last_body();
        assert_eq!(body["autodj_format"], "opus");
        assert_eq!(body["autodj_bitrate"], 96);
        assert_eq!(body["name"], "/radio.mp3");
        let data = handle.data().unwrap();
        assert_eq!(data.autodj_bitrate, Some(Lenient::Known(Bitrate::Kbps96)));
        assert!(data.enable_autodj);
    }

    #[test]
    fn null_display_name_decodes_as_empty() {
        let mount: Mount = serde_json::from_value(json!({
            "id": 3, "name": "/lofi.aac", "display_name": null, "is_default": null,
            "max_listener_duration": null, "autodj_format": null, "listeners": null
        }))
        .unwrap();
        assert_eq!(mount.name, "/lofi.aac");
        assert_eq!(mount.display_name, "");
        assert!(!mount.is_default);
        assert_eq!(mount.max_listener_duration, 0);
        assert!(mount.autodj_format.is_none());
        assert_eq!(mount.listeners.total, 0);
    }
}
