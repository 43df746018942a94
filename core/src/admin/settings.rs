//! Installation-wide settings.
//!
//! Settings are a singleton, so they are not a `Handle` resource. An update
//! sends only the supplied fields; the server leaves the rest untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{string_enum, Lenient};
use crate::error::{Error, Result};

string_enum! {
    /// Which header the server trusts for the client IP.
    pub enum IpSource ("IP source") {
        Local => "local",
        Cloudflare => "cloudflare",
        XForwardedFor => "xff",
    }
}

string_enum! {
    pub enum PublicTheme ("public theme") {
        Browser => "browser",
        Light => "light",
        Dark => "dark",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub instance_name: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub prefer_browser_url: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub use_radio_proxy: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub history_keep_days: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub always_use_ssl: bool,
    pub api_access_control: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_static_nowplaying: bool,
    pub analytics: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub check_for_updates: bool,
    pub public_theme: Option<Lenient<PublicTheme>>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hide_album_art: bool,
    pub homepage_redirect_url: Option<String>,
    pub default_album_art_url: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub hide_product_name: bool,
    pub public_custom_css: Option<String>,
    pub public_custom_js: Option<String>,
    pub internal_custom_css: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backup_enabled: bool,
    pub backup_time_code: Option<String>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub backup_keep_copies: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub enable_advanced_features: bool,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub mail_enabled: bool,
    pub mail_sender_name: Option<String>,
    pub mail_sender_email: Option<String>,
    pub ip_source: Option<Lenient<IpSource>>,
    /// Settings this client does not model, kept as returned.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_browser_url: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_radio_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_keep_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_use_ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_access_control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_static_nowplaying: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_for_updates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_theme: Option<PublicTheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_album_art: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage_redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_album_art_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_product_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_custom_css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_custom_js: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_custom_css: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_keep_copies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_advanced_features: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_sender_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_source: Option<IpSource>,
}

impl SettingsUpdate {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.history_keep_days == Some(0) {
            return Err(Error::client("history_keep_days must be at least 1"));
        }
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.is_empty()) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::client(format!("base_url {url:?} must be an http(s) URL")));
            }
        }
        Ok(())
    }

    pub(crate) fn to_body(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self).map_err(|e| Error::Serialization(e.to_string()))? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Serialization(format!("expected a JSON object, got {other}"))),
        }
    }
}

impl Settings {
    /// Overlay the fields of an accepted update.
    pub(crate) fn apply(&mut self, changes: Map<String, Value>) -> Result<()> {
        let mut merged = match serde_json::to_value(&*self)
            .map_err(|e| Error::Serialization(e.to_string()))?
        {
            Value::Object(map) => map,
            other => return Err(Error::Serialization(format!("expected a JSON object, got {other}"))),
        };
        merged.extend(changes);
        *self = serde_json::from_value(Value::Object(merged))
            .map_err(|e| Error::Deserialization(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_settings_survive_a_merge() {
        let mut settings: Settings = serde_json::from_value(json!({
            "instance_name": "Radio",
            "history_keep_days": 30,
            "geolite_license_key": "abc"
        }))
        .unwrap();
        let update = SettingsUpdate {
            history_keep_days: Some(7),
            ..Default::default()
        };
        settings.apply(update.to_body().unwrap()).unwrap();
        assert_eq!(settings.history_keep_days, 7);
        assert_eq!(settings.instance_name.as_deref(), Some("Radio"));
        assert_eq!(settings.other["geolite_license_key"], "abc");
    }

    #[test]
    fn zero_history_is_rejected() {
        let update = SettingsUpdate {
            history_keep_days: Some(0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
