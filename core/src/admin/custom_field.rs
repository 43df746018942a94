//! Custom metadata fields attached to media.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Session;
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub short_name: String,
    pub auto_assign: Option<String>,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomFieldFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_assign: Option<String>,
}

impl CustomFieldFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        match &self.short_name {
            Some(short) if short.is_empty() || !short.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                Err(Error::client(format!(
                    "custom field short name {short:?} may only contain letters, digits and underscores"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Resource for CustomField {
    type Context = Session;
    type Id = u32;
    const KIND: &'static str = "custom field";
    const COLLECTION: Endpoint = Endpoint::AdminCustomFields;
    const ITEM: Endpoint = Endpoint::AdminCustomField;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for CustomField {
    type Update = CustomFieldFields;
    const EDITABLE: &'static [&'static str] = &["name", "short_name", "auto_assign"];

    fn validate_update(&self, update: &CustomFieldFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for CustomField {
    type New = CustomFieldFields;

    fn validate_new(new: &CustomFieldFields) -> Result<()> {
        if new.name.as_deref().map_or(true, str::is_empty) {
            return Err(Error::client("a new custom field needs a name"));
        }
        new.validate()
    }
}
