//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the instance base URL.
pub const URL_ENV: &str = "AZURACAST_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "AZURACAST_API_KEY";

/// Where the instance lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub radio_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ClientConfig {
    /// Configuration without an API key; only public endpoints will succeed.
    pub fn new(radio_url: &str) -> Self {
        Self {
            radio_url: radio_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read `AZURACAST_URL` and the optional `AZURACAST_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV)
            .map_err(|_| Error::client(format!("{URL_ENV} is not set")))?;
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::from_parts(&url, api_key)
    }

    fn from_parts(url: &str, api_key: Option<String>) -> Result<Self> {
        let config = Self {
            api_key,
            ..Self::new(url)
        };
        config.validate()?;
        Ok(config)
    }

    /// The base URL must be an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let scheme_ok =
            self.radio_url.starts_with("http://") || self.radio_url.starts_with("https://");
        let has_host = self
            .radio_url
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty());
        if scheme_ok && has_host {
            Ok(())
        } else {
            Err(Error::client(format!(
                "radio URL must be an absolute http(s) URL, got {:?}",
                self.radio_url
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://radio.example.com/");
        assert_eq!(config.radio_url, "https://radio.example.com");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn api_key_is_attached() {
        let config = ClientConfig::new("https://radio.example.com").with_api_key("abc:def");
        assert_eq!(config.api_key.as_deref(), Some("abc:def"));
    }

    #[test]
    fn relative_urls_are_rejected() {
        assert!(ClientConfig::from_parts("radio.example.com", None).is_err());
        assert!(ClientConfig::from_parts("https://", None).is_err());
        assert!(ClientConfig::from_parts("http://localhost:8080", None).is_ok());
    }

    #[test]
    fn deserializes_without_api_key() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"radio_url":"https://radio.example.com"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("https://radio.example.com"));
    }
}
