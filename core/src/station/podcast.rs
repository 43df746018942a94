//! Podcasts and their episodes.
//!
//! Podcasts are addressed by string ids. Episodes live under their podcast
//! and are reached through a `PodcastContext`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{PodcastContext, StationContext};
use crate::endpoints::Endpoint;
use crate::enums::{LanguageCode, Lenient};
use crate::error::{Error, Result};
use crate::resource::{self, Creatable, Editable, Handle, Resource};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastCategory {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub category: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub text: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub title: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Podcast {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: String,
    pub storage_location_id: Option<u32>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub title: String,
    pub link: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    pub language: Option<Lenient<LanguageCode>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub author: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub email: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub has_custom_art: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art_updated_at: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub categories: Vec<PodcastCategory>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub episodes: Vec<String>,
    pub links: Value,
}

/// Categories are written as `"Category"` or `"Category|Subcategory"`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PodcastFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl PodcastFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>, language: LanguageCode) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            language: Some(language),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(Error::client(format!("{email:?} is not an email address")));
            }
        }
        if let Some(categories) = &self.categories {
            if let Some(bad) = categories
                .iter()
                .find(|c| c.is_empty() || c.split('|').count() > 2)
            {
                return Err(Error::client(format!(
                    "podcast category {bad:?} must be 'Category' or 'Category|Subcategory'"
                )));
            }
        }
        Ok(())
    }
}

impl Resource for Podcast {
    type Context = StationContext;
    type Id = String;
    const KIND: &'static str = "podcast";
    const COLLECTION: Endpoint = Endpoint::StationPodcasts;
    const ITEM: Endpoint = Endpoint::StationPodcast;

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Editable for Podcast {
    type Update = PodcastFields;
    const EDITABLE: &'static [&'static str] = &[
        "title",
        "link",
        "description",
        "language",
        "author",
        "email",
    ];

    fn validate_update(&self, update: &PodcastFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for Podcast {
    type New = PodcastFields;

    fn validate_new(new: &PodcastFields) -> Result<()> {
        if new.title.as_deref().map_or(true, str::is_empty)
            || new.description.is_none()
            || new.language.is_none()
        {
            return Err(Error::client(
                "a new podcast needs a title, a description and a language",
            ));
        }
        new.validate()
    }
}

impl Handle<Podcast> {
    /// Context addressing this podcast's episodes.
    pub fn episode_context(&self) -> Result<PodcastContext> {
        match (self.context(), self.data()) {
            (Some(station), Some(data)) => station.podcast(&data.id),
            _ => Err(Error::client("podcast has been deleted")),
        }
    }

    pub fn episodes(&self) -> Result<Vec<Handle<PodcastEpisode>>> {
        resource::list(&self.episode_context()?)
    }

    pub fn episode(&self, episode_id: &str) -> Result<Handle<PodcastEpisode>> {
        resource::fetch(&self.episode_context()?, episode_id.to_string())
    }

    pub fn create_episode(&self, new: &EpisodeFields) -> Result<Handle<PodcastEpisode>> {
        resource::create(&self.episode_context()?, new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastEpisode {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub title: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub explicit: bool,
    pub publish_at: Option<i64>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub has_media: bool,
    pub media: Value,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub has_custom_art: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub art_updated_at: i64,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EpisodeFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<i64>,
}

impl EpisodeFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

impl Resource for PodcastEpisode {
    type Context = PodcastContext;
    type Id = String;
    const KIND: &'static str = "podcast episode";
    const COLLECTION: Endpoint = Endpoint::StationPodcastEpisodes;
    const ITEM: Endpoint = Endpoint::StationPodcastEpisode;

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Editable for PodcastEpisode {
    type Update = EpisodeFields;
    const EDITABLE: &'static [&'static str] = &["title", "description", "explicit", "publish_at"];
}

impl Creatable for PodcastEpisode {
    type New = EpisodeFields;

    fn validate_new(new: &EpisodeFields) -> Result<()> {
        if new.title.as_deref().map_or(true, str::is_empty) || new.description.is_none() {
            return Err(Error::client("a new episode needs a title and a description"));
        }
        Ok(())
    }
}
