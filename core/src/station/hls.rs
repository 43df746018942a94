//! HTTP Live Streaming renditions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::enums::{AudioFormat, Bitrate, Lenient};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsStream {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    pub format: Option<Lenient<AudioFormat>>,
    pub bitrate: Option<Lenient<Bitrate>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub listeners: u32,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HlsStreamFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<Bitrate>,
}

impl HlsStreamFields {
    pub fn new(name: impl Into<String>, format: AudioFormat, bitrate: Bitrate) -> Self {
        Self {
            name: Some(name.into()),
            format: Some(format),
            bitrate: Some(bitrate),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::client(format!(
                    "HLS stream name {name:?} may only contain letters, digits and underscores"
                )));
            }
        }
        Ok(())
    }
}

impl Resource for HlsStream {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "HLS stream";
    const COLLECTION: Endpoint = Endpoint::StationHlsStreams;
    const ITEM: Endpoint = Endpoint::StationHlsStream;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for HlsStream {
    type Update = HlsStreamFields;
    const EDITABLE: &'static [&'static str] = &["name", "format", "bitrate"];

    fn validate_update(&self, update: &HlsStreamFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for HlsStream {
    type New = HlsStreamFields;

    fn validate_new(new: &HlsStreamFields) -> Result<()> {
        if new.name.is_none() {
            return Err(Error::client("a new HLS stream needs a name"));
        }
        new.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::ScriptedTransport;
    use crate::resource::{create, tests::station_with};

    #[test]
    fn names_are_restricted() {
        let transport = ScriptedTransport::new();
        let station = station_with(&transport);
        let fields = HlsStreamFields::new("aac lofi", AudioFormat::Aac, Bitrate::Kbps64);
        assert!(matches!(
            create::<HlsStream>(&station, &fields),
            Err(Error::Client(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }
}
