//! SFTP accounts with access to the station's media directory.
//!
//! The server stores authorized keys as one newline-delimited string.
//! `add_public_key` and `remove_public_key` edit that list one key at a time
//! and always send the complete revised list.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::StationContext;
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Handle, Resource};

const KEY_ALGORITHMS: &[&str] = &[
    "ssh-rsa",
    "ssh-dss",
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
    "sk-ssh-ed25519@openssh.com",
    "sk-ecdsa-sha2-nistp256@openssh.com",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SftpUser {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "publicKeys")]
    pub public_keys: Option<String>,
    pub links: Value,
}

impl SftpUser {
    /// Authorized keys, one per entry, blank lines dropped.
    pub fn keys(&self) -> Vec<&str> {
        self.public_keys
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SftpUserFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "publicKeys", skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<String>,
}

impl SftpUserFields {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            public_keys: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(keys) = &self.public_keys {
            for key in keys.lines().map(str::trim).filter(|l| !l.is_empty()) {
                validate_public_key(key)?;
            }
        }
        Ok(())
    }
}

/// Check an OpenSSH `authorized_keys` line: a known algorithm followed by a
/// base64 blob, with an optional comment.
pub fn validate_public_key(key: &str) -> Result<()> {
    let mut parts = key.split_whitespace();
    let (Some(algorithm), Some(blob)) = (parts.next(), parts.next()) else {
        return Err(Error::client("public key must be '<algorithm> <base64> [comment]'"));
    };
    if !KEY_ALGORITHMS.contains(&algorithm) {
        return Err(Error::client(format!(
            "unsupported public key algorithm {algorithm:?}"
        )));
    }
    if STANDARD.decode(blob).is_err() {
        return Err(Error::client("public key body is not valid base64"));
    }
    Ok(())
}

impl Resource for SftpUser {
    type Context = StationContext;
    type Id = u32;
    const KIND: &'static str = "SFTP user";
    const COLLECTION: Endpoint = Endpoint::StationSftpUsers;
    const ITEM: Endpoint = Endpoint::StationSftpUser;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for SftpUser {
    type Update = SftpUserFields;
    const EDITABLE: &'static [&'static str] = &["username", "publicKeys"];

    fn validate_update(&self, update: &SftpUserFields) -> Result<()> {
        update.validate()
    }
}

impl Creatable for SftpUser {
    type New = SftpUserFields;

    fn validate_new(new: &SftpUserFields) -> Result<()> {
        if new.username.as_deref().map_or(true, str::is_empty) || new.password.is_none() {
            return Err(Error::client("a new SFTP user needs a username and a password"));
        }
        new.validate()
    }
}

impl Handle<SftpUser> {
    fn current_keys(&self) -> Result<Vec<String>> {
        let data = self
            .data()
            .ok_or_else(|| Error::client("SFTP user has been deleted"))?;
        Ok(data.keys().into_iter().map(str::to_string).collect())
    }

    fn put_keys(&mut self, keys: Vec<String>) -> Result<Value> {
        self.edit(SftpUserFields {
            public_keys: Some(keys.join("\n")),
            ..Default::default()
        })
    }

    /// Authorize one more key.
    pub fn add_public_key(&mut self, key: &str) -> Result<Value> {
        let key = key.trim();
        validate_public_key(key)?;
        let mut keys = self.current_keys()?;
        if keys.iter().any(|k| k == key) {
            return Err(Error::client("public key is already authorized"));
        }
        keys.push(key.to_string());
        self.put_keys(keys)
    }

    /// Revoke a previously authorized key.
    pub fn remove_public_key(&mut self, key: &str) -> Result<Value> {
        let key = key.trim();
        let mut keys = self.current_keys()?;
        let before = keys.len();
        keys.retain(|k| k != key);
        if keys.len() == before {
            return Err(Error::client("public key is not authorized for this user"));
        }
        self.put_keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::testing::ScriptedTransport;
    use crate::resource::tests::station_with;

    const KEY_A: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl alice@host";
    const KEY_B: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC7 bob@host";

    fn user(transport: &ScriptedTransport) -> Handle<SftpUser> {
        let data: SftpUser = serde_json::from_value(json!({
            "id": 3, "username": "uploader", "publicKeys": KEY_A
        }))
        .unwrap();
        Handle::new(station_with(transport), data)
    }

    #[test]
    fn key_format_is_checked() {
        assert!(validate_public_key(KEY_A).is_ok());
        assert!(validate_public_key(KEY_B).is_ok());
        assert!(validate_public_key("ssh-ed25519").is_err());
        assert!(validate_public_key("pgp-key AAAA").is_err());
        assert!(validate_public_key("ssh-rsa not*base64").is_err());
    }

    #[test]
    fn add_sends_full_list() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": true}));
        let mut handle = user(&transport);

        handle.add_public_key(KEY_B).unwrap();

        let body = transport.last_body();
        assert_eq!(body["publicKeys"], format!("{KEY_A}\n{KEY_B}"));
        assert_eq!(body["username"], "uploader");
        assert_eq!(handle.data().unwrap().keys(), vec![KEY_A, KEY_B]);
    }

    #[test]
    fn duplicate_and_malformed_keys_are_rejected_locally() {
        let transport = ScriptedTransport::new();
        let mut handle = user(&transport);

        assert!(matches!(handle.add_public_key(KEY_A), Err(Error::Client(_))));
        assert!(matches!(handle.add_public_key("garbage"), Err(Error::Client(_))));
        assert!(matches!(handle.remove_public_key(KEY_B), Err(Error::Client(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn remove_last_key_sends_empty_list() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": true}));
        let mut handle = user(&transport);

        handle.remove_public_key(KEY_A).unwrap();
        assert_eq!(transport.last_body()["publicKeys"], "");
        assert!(handle.data().unwrap().keys().is_empty());
    }

    #[test]
    fn declined_add_keeps_keys() {
        let transport = ScriptedTransport::new();
        transport.push_json(json!({"success": false, "message": "Invalid key"}));
        let mut handle = user(&transport);

        let response = handle.add_public_key(KEY_B).unwrap();
        assert_eq!(response["success"], false);
        assert_eq!(handle.data().unwrap().keys(), vec![KEY_A]);
    }
}
