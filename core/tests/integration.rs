//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port in a background thread
//! and drives the client over real HTTP with the default ureq transport. This
//! covers URL rendering, headers and response classification together.

use azuracast_core::admin::SettingsUpdate;
use azuracast_core::enums::{LanguageCode, Lenient};
use azuracast_core::station::{
    EpisodeFields, Playlist, PlaylistFields, Podcast, PodcastFields, SftpUser, SftpUserFields,
};
use azuracast_core::types::NowPlayingResponse;
use azuracast_core::{AzuraCastClient, ClientConfig, Error, HttpMethod, ServiceAction};

const API_KEY: &str = "test-key";
const PUBLIC_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl ci@build";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a mock server and return its base URL.
fn spawn_server(api_key: Option<&'static str>) -> String {
    init_tracing();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, api_key).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client(url: &str, api_key: Option<&str>) -> AzuraCastClient {
    let mut config = ClientConfig::new(url);
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    AzuraCastClient::new(&config).unwrap()
}

#[test]
fn public_endpoints() {
    let url = spawn_server(Some(API_KEY));
    let client = client(&url, None);

    assert!(client.status().unwrap().online);
    assert_eq!(client.time().unwrap().timestamp, 1_700_000_000);
    assert_eq!(client.stations().unwrap()[0].shortcode, "radio_one");

    let single = client.now_playing(Some(1)).unwrap();
    assert_eq!(single.single().unwrap().station.id, 1);

    // An unknown id is answered with the full list.
    match client.now_playing(Some(999)).unwrap() {
        NowPlayingResponse::All(all) => assert_eq!(all.len(), 1),
        other => panic!("expected the full list, got {other:?}"),
    }

    assert!(matches!(client.station(7), Err(Error::NotFound)));
}

#[test]
fn playlist_lifecycle() {
    let url = spawn_server(Some(API_KEY));
    let station = client(&url, Some(API_KEY)).station(1).unwrap();

    let seeded = station.list::<Playlist>().unwrap();
    assert_eq!(seeded.len(), 1);
    assert_eq!(seeded[0].data().unwrap().name, "default");

    let mut playlist = station
        .create::<Playlist>(&PlaylistFields::named("Night"))
        .unwrap();
    let id = playlist.data().unwrap().id;
    assert!(id > 1);

    // A blank name is refused by the server as data; nothing changes locally.
    let response = playlist
        .edit(PlaylistFields {
            name: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(playlist.data().unwrap().name, "Night");

    let response = playlist
        .edit(PlaylistFields {
            weight: Some(9),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(playlist.data().unwrap().weight, 9);
    assert_eq!(playlist.data().unwrap().name, "Night");

    playlist.toggle().unwrap();
    assert!(playlist.data().unwrap().is_enabled);

    let fetched = station.get_one::<Playlist>(id).unwrap();
    assert_eq!(fetched.data(), playlist.data());

    playlist.delete().unwrap();
    assert!(playlist.is_deleted());
    assert!(matches!(playlist.edit(PlaylistFields::default()), Err(Error::Client(_))));
    assert!(matches!(station.get_one::<Playlist>(id), Err(Error::NotFound)));

    // Local validation stops bad input before any request.
    assert!(matches!(
        station.create::<Playlist>(&PlaylistFields::default()),
        Err(Error::Client(_))
    ));
}

#[test]
fn sftp_keys_round_trip() {
    let url = spawn_server(Some(API_KEY));
    let station = client(&url, Some(API_KEY)).station(1).unwrap();

    let mut user = station
        .create::<SftpUser>(&SftpUserFields::new("uploader", "hunter2"))
        .unwrap();
    assert_eq!(user.data().unwrap().password, None);

    user.add_public_key(PUBLIC_KEY).unwrap();
    assert!(matches!(user.add_public_key(PUBLIC_KEY), Err(Error::Client(_))));

    user.refresh().unwrap();
    assert_eq!(user.data().unwrap().keys(), vec![PUBLIC_KEY]);

    user.remove_public_key(PUBLIC_KEY).unwrap();
    user.refresh().unwrap();
    assert!(user.data().unwrap().keys().is_empty());
}

#[test]
fn podcast_episodes() {
    let url = spawn_server(Some(API_KEY));
    let station = client(&url, Some(API_KEY)).station(1).unwrap();

    let podcast = station
        .create::<Podcast>(&PodcastFields::new("Talk", "Weekly talk", "en".parse().unwrap()))
        .unwrap();
    let podcast_id = podcast.data().unwrap().id.clone();
    assert!(!podcast_id.is_empty());

    let episode = podcast
        .create_episode(&EpisodeFields::new("Pilot", "First episode"))
        .unwrap();
    let episode_id = episode.data().unwrap().id.clone();

    let episodes = podcast.episodes().unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(podcast.episode(&episode_id).unwrap().data().unwrap().title, "Pilot");

    let fetched = station.get_one::<Podcast>(podcast_id).unwrap();
    let language = fetched.data().unwrap().language.as_ref().and_then(Lenient::known);
    assert_eq!(language.map(LanguageCode::as_str), Some("en"));
}

#[test]
fn station_control() {
    let url = spawn_server(Some(API_KEY));
    let station = client(&url, Some(API_KEY)).station(1).unwrap();

    assert!(station.status().unwrap().backend_running);
    assert_eq!(station.listeners().unwrap()[0].ip, "203.0.113.7");
    assert!(station.history().unwrap().is_empty());
    assert_eq!(station.restart().unwrap()["success"], true);
    assert_eq!(station.backend(ServiceAction::Skip).unwrap()["success"], true);
    assert!(matches!(station.frontend(ServiceAction::Skip), Err(Error::Client(_))));
}

#[test]
fn faulty_station_errors_are_classified() {
    let url = spawn_server(Some(API_KEY));
    let station = client(&url, Some(API_KEY))
        .station(mock_server::FAULTY_STATION_ID)
        .unwrap();

    match station.status() {
        Err(Error::Api { kind, message }) => {
            assert_eq!(kind, "SupervisorException");
            assert_eq!(message, "Backend process is not running.");
        }
        other => panic!("expected a JSON exception, got {other:?}"),
    }

    match station.listeners() {
        Err(Error::Api { kind, message }) => {
            assert_eq!(kind, "StationUnavailableException");
            assert_eq!(message, "Station is offline.");
        }
        other => panic!("expected an HTML exception, got {other:?}"),
    }

    match station.history() {
        Err(Error::Unexpected { url, body }) => {
            assert!(url.ends_with("/api/station/99/history"));
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("expected an unexpected response, got {other:?}"),
    }
}

#[test]
fn authentication_failures_are_access_denied() {
    let url = spawn_server(Some(API_KEY));

    // Without a key the server answers 200 with its login page.
    let anonymous = client(&url, None).station(1).unwrap();
    assert!(matches!(anonymous.status(), Err(Error::AccessDenied)));

    let wrong = client(&url, Some("wrong")).station(1).unwrap();
    assert!(matches!(wrong.list::<Playlist>(), Err(Error::AccessDenied)));
}

#[test]
fn wrong_method_is_a_client_defect() {
    let url = spawn_server(Some(API_KEY));
    let client = client(&url, Some(API_KEY));

    let err = client
        .session()
        .dispatcher()
        .send(HttpMethod::Delete, &format!("{url}/api/status"), None)
        .unwrap_err();
    assert!(matches!(err, Error::MethodNotAllowed { method: HttpMethod::Delete, .. }));
    assert!(err.is_fatal());
}

#[test]
fn transport_failure_without_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&url, None).status().unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[test]
fn admin_settings_update() {
    let url = spawn_server(Some(API_KEY));
    let admin = client(&url, Some(API_KEY)).admin();

    let mut settings = admin.settings().unwrap();
    assert_eq!(settings.instance_name.as_deref(), Some("Mock Radio"));
    assert_eq!(settings.history_keep_days, 30);
    assert!(settings.other.contains_key("geolite_license_key"));

    let response = admin
        .update_settings(
            &mut settings,
            SettingsUpdate {
                instance_name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(settings.instance_name.as_deref(), Some("Renamed"));

    let fresh = admin.settings().unwrap();
    assert_eq!(fresh.instance_name.as_deref(), Some("Renamed"));
    assert_eq!(fresh.history_keep_days, 30);

    let catalogue = admin.permissions().unwrap();
    assert_eq!(catalogue.global.len(), 2);
}
