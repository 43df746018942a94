//! Read-only payloads. Editable resources live with their owners in
//! `station` and `admin`.

use serde::{Deserialize, Deserializer};

mod public;
mod telemetry;

pub use public::{
    ApiStatus, CurrentSong, Listeners, LiveInfo, MountInfo, NextSong, NowPlaying,
    NowPlayingResponse, RemoteInfo, ServerTime, Song, SongHistory, StationInfo,
};
pub use telemetry::{
    Listener, ListenerDevice, ListenerLocation, PermissionCatalogue, PermissionInfo,
    RequestableSong, ScheduleEntry, ServiceStatus, StationStatus,
};

/// Read a field the server may send as `null`, falling back to its default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let song: Song = serde_json::from_value(json!({
            "id": "abc",
            "artist": null,
            "title": "Title",
            "album": null,
            "custom_fields": null
        }))
        .unwrap();
        assert_eq!(song.id, "abc");
        assert_eq!(song.artist, "");
        assert_eq!(song.album, "");
        assert!(song.custom_fields.is_empty());

        let history: SongHistory =
            serde_json::from_value(json!({"sh_id": null, "duration": null, "song": null})).unwrap();
        assert_eq!(history.sh_id, 0);
        assert_eq!(history.song, Song::default());
    }

    #[test]
    fn wrong_type_is_still_rejected() {
        let err = serde_json::from_value::<Song>(json!({"title": 42})).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }
}
