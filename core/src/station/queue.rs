//! Upcoming AutoDJ queue. Entries can be inspected and removed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::resource::Resource;
use crate::types::Song;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueItem {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub cued_at: i64,
    pub played_at: Option<i64>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub duration: f64,
    pub playlist: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_request: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub is_played: bool,
    pub autodj_custom_uri: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub song: Song,
    pub links: Value,
}

impl Resource for QueueItem {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "queue item";
    const COLLECTION: Endpoint = Endpoint::StationQueue;
    const ITEM: Endpoint = Endpoint::StationQueueItem;

    fn id(&self) -> u32 {
        self.id
    }
}
