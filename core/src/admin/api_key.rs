//! API keys issued to users. Keys can be listed and revoked, not edited.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Session;
use crate::endpoints::Endpoint;
use crate::resource::Resource;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub comment: String,
    pub user: Value,
    pub links: Value,
}

impl Resource for ApiKey {
    type Context = Session;
    type Id = String;
    const KIND: &'static str = "API key";
    const COLLECTION: Endpoint = Endpoint::AdminApiKeys;
    const ITEM: Endpoint = Endpoint::AdminApiKey;

    fn id(&self) -> String {
        self.id.clone()
    }
}
