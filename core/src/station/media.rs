//! Media library files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::resource::{Creatable, Editable, Resource};
use crate::upload::UploadFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationFile {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub unique_id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song_id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub path: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub mtime: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub length: f64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub length_text: String,
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
    pub lyrics: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub isrc: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub custom_fields: Map<String, Value>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub playlists: Vec<Value>,
    pub links: Value,
}

/// Metadata a file accepts in an edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
}

impl Resource for StationFile {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "media file";
    const COLLECTION: Endpoint = Endpoint::StationFiles;
    const ITEM: Endpoint = Endpoint::StationFile;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for StationFile {
    type Update = FileMetadata;
    const EDITABLE: &'static [&'static str] = &[
        "path", "artist", "title", "album", "genre", "lyrics", "isrc", "custom_fields",
    ];
}

impl Creatable for StationFile {
    type New = UploadFile;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::testing::ScriptedTransport;
    use crate::resource::{create, list, tests::station_with, Handle};

    #[test]
    fn upload_posts_base64_body() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"id": 41, "path": "ids/station.mp3", "title": "Station ID"}));
        let station = station_with(&transport);

        let upload = UploadFile::from_bytes("ids/station.mp3", b"abc").unwrap();
        let file = create::<StationFile>(&station, &upload).unwrap();

        assert_eq!(file.data().unwrap().id, 41);
        assert_eq!(
            transport.requests()[0].url,
            "http://radio.test/api/station/1/files"
        );
        assert_eq!(
            transport.last_body(),
            json!({"path": "ids/station.mp3", "file": "YWJj"})
        );
    }

    #[test]
    fn metadata_edit_keeps_other_tags() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": true}));
        let data: StationFile = serde_json::from_value(json!({
            "id": 41, "path": "a.mp3", "artist": "Band", "title": "Song", "length": 182.5
        }))
        .unwrap();
        let mut handle = Handle::new(station_with(&transport), data);

        handle
            .edit(FileMetadata {
                genre: Some("Jazz".into()),
                ..Default::default()
            })
            .unwrap();

        let body = transport.last_body();
        assert_eq!(body["genre"], "Jazz");
        assert_eq!(body["artist"], "Band");
        assert!(body.get("length").is_none());
        assert_eq!(handle.data().unwrap().length, 182.5);
    }

    #[test]
    fn listing_with_null_tags_decodes() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!([
            {
                "id": 41, "unique_id": "a1", "song_id": "s1", "path": "ids/station.mp3",
                "length": 12.0, "length_text": "0:12", "text": "Station ID",
                "artist": null, "title": "Station ID", "album": null, "genre": null,
                "lyrics": null, "isrc": null, "art": null, "custom_fields": null,
                "playlists": null
            },
            {"id": 42, "path": "music/song.mp3", "artist": "Band", "title": "Song", "album": "LP"}
        ]));
        let station = station_with(&transport);

        let files = list::<StationFile>(&station).unwrap();
        assert_eq!(files.len(), 2);
        let id = files[0].data().unwrap();
        assert_eq!(id.title, "Station ID");
        assert_eq!(id.artist, "");
        assert_eq!(id.album, "");
        assert_eq!(id.isrc, "");
        assert!(id.custom_fields.is_empty());
        assert!(id.playlists.is_empty());
        assert_eq!(files[1].data().unwrap().album, "LP");
    }
}
