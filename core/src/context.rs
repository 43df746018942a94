//! Back-reference contexts held by resource handles.
//!
//! A context carries what a resource needs to address itself: the shared
//! `Session` (dispatcher and base URL) plus the identifiers of its owners.
//! Contexts are cheap to clone and read-only; every clone shares the same
//! dispatcher.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::endpoints::{Endpoint, UrlParams};
use crate::error::{Error, Result};
use crate::http::HttpMethod;

/// Something a resource can build URLs from and dispatch through.
pub trait Context: Clone + fmt::Debug {
    fn session(&self) -> &Session;

    /// Placeholder values identifying the owner.
    fn params(&self) -> UrlParams;

    fn url(&self, endpoint: Endpoint) -> Result<String> {
        endpoint.url(&self.params())
    }
}

/// Shared dispatcher plus the instance base URL.
#[derive(Debug, Clone)]
pub struct Session {
    dispatcher: Arc<Dispatcher>,
    radio_url: Arc<str>,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_dispatcher(&config.radio_url, Dispatcher::new(config.api_key.clone()))
    }

    pub fn with_dispatcher(radio_url: &str, dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            radio_url: Arc::from(radio_url.trim_end_matches('/')),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn radio_url(&self) -> &str {
        &self.radio_url
    }

    pub fn station(&self, station_id: u32) -> Result<StationContext> {
        validate_id("station", station_id)?;
        Ok(StationContext {
            session: self.clone(),
            station_id,
        })
    }

    pub(crate) fn send(&self, method: HttpMethod, url: &str, body: Option<&Value>) -> Result<Value> {
        self.dispatcher.send(method, url, body)
    }

    pub(crate) fn get_as<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.dispatcher.send_as(HttpMethod::Get, url, None)
    }
}

impl Context for Session {
    fn session(&self) -> &Session {
        self
    }

    fn params(&self) -> UrlParams {
        UrlParams::new(&self.radio_url)
    }
}

/// Owner context for resources nested under one station.
#[derive(Debug, Clone)]
pub struct StationContext {
    session: Session,
    station_id: u32,
}

impl StationContext {
    pub fn station_id(&self) -> u32 {
        self.station_id
    }

    pub fn podcast(&self, podcast_id: &str) -> Result<PodcastContext> {
        validate_str_id("podcast", podcast_id)?;
        Ok(PodcastContext {
            station: self.clone(),
            podcast_id: podcast_id.to_string(),
        })
    }
}

impl Context for StationContext {
    fn session(&self) -> &Session {
        &self.session
    }

    fn params(&self) -> UrlParams {
        self.session.params().station(self.station_id)
    }
}

/// Owner context for episodes of one podcast.
#[derive(Debug, Clone)]
pub struct PodcastContext {
    station: StationContext,
    podcast_id: String,
}

impl PodcastContext {
    pub fn station(&self) -> &StationContext {
        &self.station
    }

    pub fn podcast_id(&self) -> &str {
        &self.podcast_id
    }
}

impl Context for PodcastContext {
    fn session(&self) -> &Session {
        self.station.session()
    }

    fn params(&self) -> UrlParams {
        self.station
            .params()
            .with("podcast_id", self.podcast_id.as_str())
    }
}

/// Numeric identifiers start at 1.
pub fn validate_id(kind: &str, id: u32) -> Result<u32> {
    if id == 0 {
        return Err(Error::client(format!("{kind} id must be a positive integer")));
    }
    Ok(id)
}

/// String identifiers are used as a single path segment.
pub fn validate_str_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::client(format!("{kind} id must not be empty")));
    }
    if id.contains(['/', '?', '#']) {
        return Err(Error::client(format!(
            "{kind} id {id:?} must not contain '/', '?' or '#'"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::ScriptedTransport;

    fn session() -> Session {
        Session::with_dispatcher(
            "https://radio.example.com/",
            Dispatcher::with_transport(ScriptedTransport::new(), None),
        )
    }

    #[test]
    fn contexts_accumulate_placeholders() {
        let station = session().station(4).unwrap();
        let podcast = station.podcast("pod-1").unwrap();
        let params = podcast.params();
        assert_eq!(params.get("radio_url"), Some("https://radio.example.com"));
        assert_eq!(params.get("station_id"), Some("4"));
        assert_eq!(params.get("podcast_id"), Some("pod-1"));
        assert_eq!(
            podcast.url(Endpoint::StationPodcastEpisodes).unwrap(),
            "https://radio.example.com/api/station/4/podcast/pod-1/episodes"
        );
    }

    #[test]
    fn zero_station_id_is_rejected() {
        assert!(matches!(session().station(0), Err(Error::Client(_))));
    }

    #[test]
    fn string_ids_must_be_single_segments() {
        assert!(validate_str_id("podcast", "").is_err());
        assert!(validate_str_id("podcast", "  ").is_err());
        assert!(validate_str_id("podcast", "a/b").is_err());
        assert!(validate_str_id("podcast", "a?b").is_err());
        assert_eq!(validate_str_id("podcast", "a-b").unwrap(), "a-b");
    }

    #[test]
    fn clones_share_the_dispatcher() {
        let session = session();
        let station = session.station(1).unwrap();
        assert!(std::ptr::eq(session.dispatcher(), station.session().dispatcher()));
    }
}
