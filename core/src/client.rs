//! Entry point for one AzuraCast instance.
//!
//! # Design
//! `AzuraCastClient` owns a `Session` (dispatcher plus base URL) and hands out
//! lightweight views: `Station` for per-station work and `Admin` for
//! installation-wide administration. Every view shares the same dispatcher,
//! so one client makes at most one request per call and never caches.

use serde_json::Value;
use tracing::debug;

use crate::admin::Admin;
use crate::config::ClientConfig;
use crate::context::{Context, Session};
use crate::dispatcher::Dispatcher;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::Transport;
use crate::station::Station;
use crate::types::{ApiStatus, NowPlaying, NowPlayingResponse, ServerTime, StationInfo};

/// Synchronous client for one AzuraCast instance.
#[derive(Debug, Clone)]
pub struct AzuraCastClient {
    session: Session,
}

impl AzuraCastClient {
    /// Client over HTTP(S) with the default ureq transport.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        debug!(radio_url = %config.radio_url, api_key = config.api_key.is_some(), "creating client");
        Ok(Self {
            session: Session::new(config),
        })
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(config: &ClientConfig, transport: impl Transport + 'static) -> Result<Self> {
        config.validate()?;
        let dispatcher = Dispatcher::with_transport(transport, config.api_key.clone());
        Ok(Self {
            session: Session::with_dispatcher(&config.radio_url, dispatcher),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Now-playing data for every station, or for one.
    ///
    /// For one station the API answers with the full list when the id is
    /// unknown; that shape comes back as `NowPlayingResponse::All`.
    pub fn now_playing(&self, station_id: Option<u32>) -> Result<NowPlayingResponse> {
        let payload: Value = match station_id {
            None => {
                let url = self.session.url(Endpoint::NowPlaying)?;
                self.session.get_as(&url)?
            }
            Some(id) => {
                let station = self.session.station(id)?;
                let url = station.url(Endpoint::NowPlayingStation)?;
                self.session.get_as(&url)?
            }
        };
        NowPlayingResponse::from_payload(payload)
    }

    /// Now-playing records of every public station.
    pub fn now_playing_all(&self) -> Result<Vec<NowPlaying>> {
        self.now_playing(None).map(NowPlayingResponse::into_vec)
    }

    pub fn status(&self) -> Result<ApiStatus> {
        let url = self.session.url(Endpoint::Status)?;
        self.session.get_as(&url)
    }

    pub fn time(&self) -> Result<ServerTime> {
        let url = self.session.url(Endpoint::Time)?;
        self.session.get_as(&url)
    }

    /// Public records of every station.
    pub fn stations(&self) -> Result<Vec<StationInfo>> {
        let url = self.session.url(Endpoint::Stations)?;
        self.session.get_as(&url)
    }

    /// Look a station up and return a view bound to it.
    pub fn station(&self, station_id: u32) -> Result<Station> {
        let context = self.session.station(station_id)?;
        let info: StationInfo = self.session.get_as(&context.url(Endpoint::Station)?)?;
        Ok(Station::new(context, info))
    }

    pub fn admin(&self) -> Admin {
        Admin::new(self.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Error;
    use crate::http::testing::ScriptedTransport;
    use crate::http::HttpMethod;

    fn client(transport: &ScriptedTransport) -> AzuraCastClient {
        let config = ClientConfig::new("http://radio.test/").with_api_key("secret");
        AzuraCastClient::with_transport(&config, transport.clone()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ClientConfig::new("radio.test");
        assert!(matches!(
            AzuraCastClient::with_transport(&config, ScriptedTransport::new()),
            Err(Error::Client(_))
        ));
    }

    #[test]
    fn now_playing_without_id_is_a_list() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!([{"station": {"id": 1}}, {"station": {"id": 2}}]));
        let all = client(&transport).now_playing_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].station.id, 2);
        assert_eq!(transport.requests()[0].url, "http://radio.test/api/nowplaying");
    }

    #[test]
    fn now_playing_with_id_is_single() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"station": {"id": 3, "name": "Three"}}));
        let response = client(&transport).now_playing(Some(3)).unwrap();
        assert_eq!(response.single().unwrap().station.name, "Three");
        assert_eq!(transport.requests()[0].url, "http://radio.test/api/nowplaying/3");
    }

    #[test]
    fn now_playing_rejects_zero_without_request() {
        let transport = ScriptedTransport::new();
        assert!(client(&transport).now_playing(Some(0)).is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn station_lookup_fetches_public_record() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"id": 1, "name": "Radio One", "shortcode": "radio_one"}));
        let station = client(&transport).station(1).unwrap();
        assert_eq!(station.info().shortcode, "radio_one");
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "http://radio.test/api/station/1");
        assert_eq!(request.header("x-api-key"), Some("secret"));
    }

    #[test]
    fn status_and_time_decode() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"online": true, "timestamp": 1700000000}));
        transport.push_json(json!({"timestamp": 1700000000, "utc_date": "2023-11-14"}));
        let client = client(&transport);
        assert!(client.status().unwrap().online);
        assert_eq!(client.time().unwrap().utc_date, "2023-11-14");
    }

    #[test]
    fn unknown_station_is_not_found() {
        let transport = ScriptedTransport::new();
        transport.push(404, "{\"code\":404}");
        assert!(matches!(client(&transport).station(99), Err(Error::NotFound)));
    }
}
