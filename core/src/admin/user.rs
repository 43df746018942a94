//! User accounts.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::context::Session;
use crate::endpoints::Endpoint;
use crate::enums::{CountryCode, LanguageCode};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub email: String,
    pub name: Option<String>,
    pub locale: Option<String>,
    pub show_24_hour_time: Option<bool>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub two_factor_enabled: bool,
    /// Role ids. The server lists roles as objects; only their ids are kept.
    #[serde(deserialize_with = "role_ids")]
    pub roles: Vec<u32>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub created_at: i64,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub updated_at: i64,
    pub links: Value,
}

fn role_ids<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u32>, D::Error> {
    let raw = Vec::<Value>::deserialize(deserializer)?;
    raw.iter()
        .map(|role| {
            role.as_u64()
                .or_else(|| role.get("id").and_then(Value::as_u64))
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| serde::de::Error::custom(format!("invalid role reference {role}")))
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_24_hour_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<u32>>,
}

impl UserFields {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            new_password: Some(password.into()),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(email) = &self.email {
            let valid = email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                return Err(Error::client(format!("{email:?} is not an email address")));
            }
        }
        if let Some(locale) = &self.locale {
            validate_locale(locale)?;
        }
        if let Some(roles) = &self.roles {
            if roles.contains(&0) {
                return Err(Error::client("role id must be a positive integer"));
            }
        }
        Ok(())
    }
}

/// `default`, or `ll_CC` with an optional `.encoding` suffix, e.g. `fr_FR.UTF-8`.
pub fn validate_locale(locale: &str) -> Result<()> {
    if locale == "default" {
        return Ok(());
    }
    let tag = locale.split_once('.').map_or(locale, |(tag, _)| tag);
    let (language, country) = tag
        .split_once('_')
        .ok_or_else(|| Error::client(format!("locale {locale:?} must look like en_US")))?;
    language.parse::<LanguageCode>()?;
    country.parse::<CountryCode>()?;
    Ok(())
}

impl Resource for User {
    type Context = Session;
    type Id = u32;
    const KIND: &'static str = "user";
    const COLLECTION: Endpoint = Endpoint::AdminUsers;
    const ITEM: Endpoint = Endpoint::AdminUser;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for User {
    type Update = UserFields;
    const EDITABLE: &'static [&'static str] =
        &["email", "name", "locale", "show_24_hour_time", "roles"];

    fn validate_update(&self, update: &UserFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for User {
    type New = UserFields;

    fn validate_new(new: &UserFields) -> Result<()> {
        if new.email.is_none() {
            return Err(Error::client("a new user needs an email address"));
        }
        new.validate()
    }
}
