//! URL templates for every resource the client talks to.
//!
//! # Design
//! The symbolic name of a resource is an `Endpoint` variant, so a name that
//! does not exist cannot be written. Each variant maps to a fixed template
//! with `{placeholder}` segments that `UrlParams` fills in. Rendering a
//! template without one of its placeholders is a programming error and is
//! reported as the fatal `Error::UnresolvedPlaceholder`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

macro_rules! endpoints {
    ($($variant:ident => $name:literal, $template:literal;)+) => {
        /// Symbolic name of an API resource.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Endpoint {
            $($variant,)+
        }

        impl Endpoint {
            pub const ALL: &'static [Endpoint] = &[$(Endpoint::$variant,)+];

            /// Symbolic name, e.g. `station_playlist`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $name,)+
                }
            }

            /// URL template with `{placeholder}` segments.
            pub fn template(self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $template,)+
                }
            }
        }
    };
}

endpoints! {
    // Public
    NowPlaying => "nowplaying", "{radio_url}/api/nowplaying";
    NowPlayingStation => "nowplaying_station", "{radio_url}/api/nowplaying/{station_id}";
    Status => "status", "{radio_url}/api/status";
    Time => "time", "{radio_url}/api/time";
    Stations => "stations", "{radio_url}/api/stations";
    Station => "station", "{radio_url}/api/station/{station_id}";

    // Station control and telemetry
    StationStatus => "station_status", "{radio_url}/api/station/{station_id}/status";
    StationRestart => "station_restart", "{radio_url}/api/station/{station_id}/restart";
    StationFrontend => "station_frontend", "{radio_url}/api/station/{station_id}/frontend/{action}";
    StationBackend => "station_backend", "{radio_url}/api/station/{station_id}/backend/{action}";
    StationHistory => "station_history", "{radio_url}/api/station/{station_id}/history";
    StationListeners => "station_listeners", "{radio_url}/api/station/{station_id}/listeners";
    StationSchedule => "station_schedule", "{radio_url}/api/station/{station_id}/schedule";
    StationQueue => "station_queue", "{radio_url}/api/station/{station_id}/queue";
    StationQueueItem => "station_queue_item", "{radio_url}/api/station/{station_id}/queue/{id}";
    StationRequests => "station_requests", "{radio_url}/api/station/{station_id}/requests";
    StationRequestSubmit => "station_request_submit", "{radio_url}/api/station/{station_id}/request/{id}";

    // Media
    StationFiles => "station_files", "{radio_url}/api/station/{station_id}/files";
    StationFile => "station_file", "{radio_url}/api/station/{station_id}/file/{id}";

    // Station configuration
    StationPlaylists => "station_playlists", "{radio_url}/api/station/{station_id}/playlists";
    StationPlaylist => "station_playlist", "{radio_url}/api/station/{station_id}/playlist/{id}";
    StationPlaylistToggle => "station_playlist_toggle", "{radio_url}/api/station/{station_id}/playlist/{id}/toggle";
    StationPlaylistReshuffle => "station_playlist_reshuffle", "{radio_url}/api/station/{station_id}/playlist/{id}/reshuffle";
    StationMounts => "station_mounts", "{radio_url}/api/station/{station_id}/mounts";
    StationMount => "station_mount", "{radio_url}/api/station/{station_id}/mount/{id}";
    StationRemotes => "station_remotes", "{radio_url}/api/station/{station_id}/remotes";
    StationRemote => "station_remote", "{radio_url}/api/station/{station_id}/remote/{id}";
    StationStreamers => "station_streamers", "{radio_url}/api/station/{station_id}/streamers";
    StationStreamer => "station_streamer", "{radio_url}/api/station/{station_id}/streamer/{id}";
    StationSftpUsers => "station_sftp_users", "{radio_url}/api/station/{station_id}/sftp-users";
    StationSftpUser => "station_sftp_user", "{radio_url}/api/station/{station_id}/sftp-user/{id}";
    StationWebhooks => "station_webhooks", "{radio_url}/api/station/{station_id}/webhooks";
    StationWebhook => "station_webhook", "{radio_url}/api/station/{station_id}/webhook/{id}";
    StationHlsStreams => "station_hls_streams", "{radio_url}/api/station/{station_id}/hls_streams";
    StationHlsStream => "station_hls_stream", "{radio_url}/api/station/{station_id}/hls_stream/{id}";

    // Podcasts
    StationPodcasts => "station_podcasts", "{radio_url}/api/station/{station_id}/podcasts";
    StationPodcast => "station_podcast", "{radio_url}/api/station/{station_id}/podcast/{id}";
    StationPodcastEpisodes => "station_podcast_episodes", "{radio_url}/api/station/{station_id}/podcast/{podcast_id}/episodes";
    StationPodcastEpisode => "station_podcast_episode", "{radio_url}/api/station/{station_id}/podcast/{podcast_id}/episode/{id}";

    // Administration
    AdminStations => "admin_stations", "{radio_url}/api/admin/stations";
    AdminStation => "admin_station", "{radio_url}/api/admin/station/{id}";
    AdminUsers => "admin_users", "{radio_url}/api/admin/users";
    AdminUser => "admin_user", "{radio_url}/api/admin/user/{id}";
    AdminRoles => "admin_roles", "{radio_url}/api/admin/roles";
    AdminRole => "admin_role", "{radio_url}/api/admin/role/{id}";
    AdminPermissions => "admin_permissions", "{radio_url}/api/admin/permissions";
    AdminCustomFields => "admin_custom_fields", "{radio_url}/api/admin/custom_fields";
    AdminCustomField => "admin_custom_field", "{radio_url}/api/admin/custom_field/{id}";
    AdminStorageLocations => "admin_storage_locations", "{radio_url}/api/admin/storage_locations";
    AdminStorageLocation => "admin_storage_location", "{radio_url}/api/admin/storage_location/{id}";
    AdminApiKeys => "admin_api_keys", "{radio_url}/api/admin/api-keys";
    AdminApiKey => "admin_api_key", "{radio_url}/api/admin/api-key/{id}";
    AdminSettings => "admin_settings", "{radio_url}/api/admin/settings";
    AdminServices => "admin_services", "{radio_url}/api/admin/services";
}

static BY_NAME: LazyLock<HashMap<&'static str, Endpoint>> =
    LazyLock::new(|| Endpoint::ALL.iter().map(|e| (e.name(), *e)).collect());

impl Endpoint {
    /// Look up an endpoint by its symbolic name.
    pub fn from_name(name: &str) -> Option<Endpoint> {
        BY_NAME.get(name).copied()
    }

    /// Substitute every placeholder of the template.
    pub fn url(self, params: &UrlParams) -> Result<String> {
        render(self.template(), params)
    }
}

/// Values for template placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    values: Vec<(&'static str, String)>,
}

impl UrlParams {
    pub fn new(radio_url: &str) -> Self {
        Self::default().with("radio_url", radio_url)
    }

    /// Set a placeholder, replacing any previous value.
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.values.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    pub fn station(self, station_id: u32) -> Self {
        self.with("station_id", station_id)
    }

    pub fn id(self, id: impl ToString) -> Self {
        self.with("id", id)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn render(template: &'static str, params: &UrlParams) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| Error::UnresolvedPlaceholder {
            template,
            placeholder: after.to_string(),
        })?;
        let name = &after[..end];
        let value = params
            .get(name)
            .ok_or_else(|| Error::UnresolvedPlaceholder {
                template,
                placeholder: name.to_string(),
            })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const BASE: &str = "https://radio.example.com";

    #[test]
    fn public_templates_render() {
        let params = UrlParams::new(BASE);
        assert_eq!(
            Endpoint::NowPlaying.url(&params).unwrap(),
            "https://radio.example.com/api/nowplaying"
        );
        assert_eq!(
            Endpoint::Status.url(&params).unwrap(),
            "https://radio.example.com/api/status"
        );
        assert_eq!(
            Endpoint::Time.url(&params).unwrap(),
            "https://radio.example.com/api/time"
        );
    }

    #[test]
    fn station_templates_render() {
        let params = UrlParams::new(BASE).station(3).id(17);
        assert_eq!(
            Endpoint::StationPlaylist.url(&params).unwrap(),
            "https://radio.example.com/api/station/3/playlist/17"
        );
        assert_eq!(
            Endpoint::StationSftpUsers.url(&params).unwrap(),
            "https://radio.example.com/api/station/3/sftp-users"
        );
        let params = params.with("action", "restart");
        assert_eq!(
            Endpoint::StationFrontend.url(&params).unwrap(),
            "https://radio.example.com/api/station/3/frontend/restart"
        );
    }

    #[test]
    fn nested_podcast_templates_render() {
        let params = UrlParams::new(BASE)
            .station(1)
            .with("podcast_id", "abc")
            .id("ep-1");
        assert_eq!(
            Endpoint::StationPodcastEpisode.url(&params).unwrap(),
            "https://radio.example.com/api/station/1/podcast/abc/episode/ep-1"
        );
    }

    #[test]
    fn admin_templates_render() {
        let params = UrlParams::new(BASE).id(5);
        assert_eq!(
            Endpoint::AdminUser.url(&params).unwrap(),
            "https://radio.example.com/api/admin/user/5"
        );
        assert_eq!(
            Endpoint::AdminApiKeys.url(&params).unwrap(),
            "https://radio.example.com/api/admin/api-keys"
        );
    }

    #[test]
    fn missing_placeholder_is_fatal() {
        let err = Endpoint::StationPlaylist
            .url(&UrlParams::new(BASE).id(1))
            .unwrap_err();
        match &err {
            Error::UnresolvedPlaceholder { placeholder, .. } => {
                assert_eq!(placeholder, "station_id")
            }
            other => panic!("expected UnresolvedPlaceholder, got {other:?}"),
        }
        assert!(err.is_fatal());
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let params = UrlParams::new(BASE).station(1).station(2);
        assert_eq!(params.get("station_id"), Some("2"));
    }

    #[test]
    fn names_are_unique_and_resolvable() {
        let names: HashSet<_> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Endpoint::ALL.len());
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_name(endpoint.name()), Some(*endpoint));
        }
        assert_eq!(Endpoint::from_name("does_not_exist"), None);
    }

    #[test]
    fn every_template_is_rooted_at_the_api() {
        for endpoint in Endpoint::ALL {
            assert!(
                endpoint.template().starts_with("{radio_url}/api/"),
                "{}",
                endpoint.name()
            );
        }
    }
}
