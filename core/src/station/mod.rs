//! Per-station operations and the resources nested under a station.
//!
//! `Station` pairs a `StationContext` with the public station record. Its
//! collection methods are generic over the resource type:
//!
//! ```no_run
//! # use azuracast_core::{AzuraCastClient, ClientConfig, Result};
//! # use azuracast_core::station::{Playlist, PlaylistFields};
//! # fn demo() -> Result<()> {
//! let client = AzuraCastClient::new(&ClientConfig::new("https://radio.example.com").with_api_key("key"))?;
//! let station = client.station(1)?;
//! let mut playlist = station.create::<Playlist>(&PlaylistFields::named("Late night"))?;
//! playlist.toggle()?;
//! for mut playlist in station.list::<Playlist>()? {
//!     playlist.refresh()?;
//! }
//! # Ok(())
//! # }
//! ```

mod hls;
mod media;
mod mount;
mod playlist;
mod podcast;
mod queue;
mod remote;
mod sftp;
mod streamer;
mod webhook;

pub use hls::{HlsStream, HlsStreamFields};
pub use media::{FileMetadata, StationFile};
pub use mount::{Mount, MountFields};
pub use playlist::{
    Playlist, PlaylistFields, PlaylistOrder, PlaylistSource, PlaylistType, RemoteType,
    ScheduleItem,
};
pub use podcast::{EpisodeFields, Podcast, PodcastCategory, PodcastEpisode, PodcastFields};
pub use queue::QueueItem;
pub use remote::{RemoteRelay, RemoteRelayFields, RemoteServerType};
pub use sftp::{validate_public_key, SftpUser, SftpUserFields};
pub use streamer::{Streamer, StreamerFields};
pub use webhook::{Webhook, WebhookFields};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::context::{validate_str_id, Context, StationContext};
use crate::endpoints::Endpoint;
use crate::enums::string_enum;
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::resource::{self, Creatable, Handle, Resource};
use crate::types::{
    Listener, NowPlayingResponse, RequestableSong, ScheduleEntry, SongHistory, StationInfo,
    StationStatus,
};
use crate::upload::UploadFile;

string_enum! {
    /// Action sent to a station's frontend or backend service.
    pub enum ServiceAction ("service action") {
        Start => "start",
        Stop => "stop",
        Restart => "restart",
        /// Skip the current song. Backend only.
        Skip => "skip",
    }
}

/// One station, as seen through its public record.
#[derive(Debug, Clone)]
pub struct Station {
    context: StationContext,
    info: StationInfo,
}

impl Station {
    pub(crate) fn new(context: StationContext, info: StationInfo) -> Self {
        Self { context, info }
    }

    pub fn id(&self) -> u32 {
        self.context.station_id()
    }

    pub fn info(&self) -> &StationInfo {
        &self.info
    }

    pub fn context(&self) -> &StationContext {
        &self.context
    }

    fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = self.context.url(endpoint)?;
        self.context.session().get_as(&url)
    }

    fn post(&self, endpoint: Endpoint, action: Option<ServiceAction>) -> Result<Value> {
        let params = match action {
            Some(action) => self.context.params().with("action", action),
            None => self.context.params(),
        };
        let url = endpoint.url(&params)?;
        self.context.session().send(HttpMethod::Post, &url, None)
    }

    /// Re-read the public station record.
    pub fn refresh(&mut self) -> Result<()> {
        self.info = self.get(Endpoint::Station)?;
        Ok(())
    }

    pub fn now_playing(&self) -> Result<NowPlayingResponse> {
        let payload: Value = self.get(Endpoint::NowPlayingStation)?;
        NowPlayingResponse::from_payload(payload)
    }

    pub fn status(&self) -> Result<StationStatus> {
        self.get(Endpoint::StationStatus)
    }

    /// Restart every service of the station and apply pending configuration.
    pub fn restart(&self) -> Result<Value> {
        info!(station_id = self.id(), "restarting station");
        self.post(Endpoint::StationRestart, None)
    }

    pub fn frontend(&self, action: ServiceAction) -> Result<Value> {
        if action == ServiceAction::Skip {
            return Err(Error::client("the frontend service cannot skip songs"));
        }
        info!(station_id = self.id(), %action, "frontend action");
        self.post(Endpoint::StationFrontend, Some(action))
    }

    pub fn backend(&self, action: ServiceAction) -> Result<Value> {
        info!(station_id = self.id(), %action, "backend action");
        self.post(Endpoint::StationBackend, Some(action))
    }

    pub fn history(&self) -> Result<Vec<SongHistory>> {
        self.get(Endpoint::StationHistory)
    }

    pub fn listeners(&self) -> Result<Vec<Listener>> {
        self.get(Endpoint::StationListeners)
    }

    pub fn schedule(&self) -> Result<Vec<ScheduleEntry>> {
        self.get(Endpoint::StationSchedule)
    }

    /// Songs listeners may currently request.
    pub fn requests(&self) -> Result<Vec<RequestableSong>> {
        self.get(Endpoint::StationRequests)
    }

    /// Submit a listener request by its `request_id`.
    pub fn submit_request(&self, request_id: &str) -> Result<Value> {
        validate_str_id("request", request_id)?;
        let url = Endpoint::StationRequestSubmit.url(&self.context.params().id(request_id))?;
        self.context.session().send(HttpMethod::Post, &url, None)
    }

    pub fn queue(&self) -> Result<Vec<Handle<QueueItem>>> {
        resource::list(&self.context)
    }

    pub fn files(&self) -> Result<Vec<Handle<StationFile>>> {
        resource::list(&self.context)
    }

    pub fn file(&self, id: u32) -> Result<Handle<StationFile>> {
        resource::fetch(&self.context, id)
    }

    pub fn upload_file(&self, upload: &UploadFile) -> Result<Handle<StationFile>> {
        info!(station_id = self.id(), path = upload.path(), "uploading media");
        resource::create(&self.context, upload)
    }

    /// Every record of a station collection.
    pub fn list<T>(&self) -> Result<Vec<Handle<T>>>
    where
        T: Resource<Context = StationContext>,
    {
        resource::list(&self.context)
    }

    /// One record of a station collection.
    pub fn get_one<T>(&self, id: T::Id) -> Result<Handle<T>>
    where
        T: Resource<Context = StationContext>,
    {
        resource::fetch(&self.context, id)
    }

    pub fn create<T>(&self, new: &T::New) -> Result<Handle<T>>
    where
        T: Creatable<Context = StationContext>,
    {
        resource::create(&self.context, new)
    }
}
