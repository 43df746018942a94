//! Storage locations for media, recordings, podcasts and backups.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Session;
use crate::endpoints::Endpoint;
use crate::enums::{string_enum, Lenient};
use crate::error::{Error, Result};
use crate::resource::{Creatable, Editable, Resource};

string_enum! {
    /// What a storage location holds.
    pub enum StorageType ("storage type") {
        StationMedia => "station_media",
        StationRecordings => "station_recordings",
        StationPodcasts => "station_podcasts",
        Backup => "backup",
    }
}

string_enum! {
    /// Where a storage location keeps its files.
    pub enum StorageAdapter ("storage adapter") {
        Local => "local",
        S3 => "s3",
        Dropbox => "dropbox",
        Sftp => "sftp",
    }
}

impl StorageAdapter {
    /// Fields a location on this adapter must define.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            StorageAdapter::Local => &["path"],
            StorageAdapter::S3 => &["s3_credential_key", "s3_credential_secret", "s3_region", "s3_bucket"],
            StorageAdapter::Dropbox => &["dropbox_auth_token"],
            StorageAdapter::Sftp => &["sftp_host", "sftp_username"],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageLocation {
    #[serde(deserialize_with = "crate::types::null_default")]
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: Option<Lenient<StorageType>>,
    pub adapter: Option<Lenient<StorageAdapter>>,
    pub path: Option<String>,
    pub s3_credential_key: Option<String>,
    pub s3_credential_secret: Option<String>,
    pub s3_region: Option<String>,
    pub s3_version: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
    pub dropbox_auth_token: Option<String>,
    pub sftp_host: Option<String>,
    pub sftp_username: Option<String>,
    pub sftp_password: Option<String>,
    pub sftp_port: Option<u16>,
    pub storage_quota: Option<String>,
    pub storage_quota_bytes: Option<String>,
    pub storage_used: Option<String>,
    pub storage_used_bytes: Option<String>,
    pub storage_used_percent: Option<u32>,
    #[serde(deserialize_with = "crate::types::null_default")]
    pub stations: Vec<String>,
    pub links: Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageLocationFields {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StorageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<StorageAdapter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_credential_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_credential_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropbox_auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sftp_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sftp_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sftp_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sftp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<String>,
}

impl StorageLocationFields {
    pub fn local(kind: StorageType, path: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            adapter: Some(StorageAdapter::Local),
            path: Some(path.into()),
            ..Default::default()
        }
    }
}

impl Resource for StorageLocation {
    type Context = Session;
    type Id = u32;
    const KIND: &'static str = "storage location";
    const COLLECTION: Endpoint = Endpoint::AdminStorageLocations;
    const ITEM: Endpoint = Endpoint::AdminStorageLocation;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Editable for StorageLocation {
    type Update = StorageLocationFields;
    const EDITABLE: &'static [&'static str] = &[
        "adapter",
        "path",
        "s3_credential_key",
        "s3_credential_secret",
        "s3_region",
        "s3_version",
        "s3_bucket",
        "s3_endpoint",
        "dropbox_auth_token",
        "sftp_host",
        "sftp_username",
        "sftp_password",
        "sftp_port",
        "storage_quota",
    ];

    fn validate_update(&self, update: &StorageLocationFields) -> Result<()> {
        let current = self.kind.as_ref().and_then(Lenient::known);
        if update.kind.is_some_and(|kind| Some(&kind) != current) {
            return Err(Error::client("the type of a storage location cannot change"));
        }
        Ok(())
    }
}

impl Creatable for StorageLocation {
    type New = StorageLocationFields;

    fn validate_new(new: &StorageLocationFields) -> Result<()> {
        let (Some(_), Some(adapter)) = (new.kind, new.adapter) else {
            return Err(Error::client("a new storage location needs a type and an adapter"));
        };
        let body = serde_json::to_value(new).map_err(|e| Error::Serialization(e.to_string()))?;
        let missing: Vec<&str> = adapter
            .required_fields()
            .iter()
            .copied()
            .filter(|field| body.get(field).and_then(Value::as_str).map_or(true, str::is_empty))
            .collect();
        if !missing.is_empty() {
            return Err(Error::client(format!(
                "{adapter} storage needs {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}
