//! Media upload bodies.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::error::{Error, Result};

/// `{"path": <destination>, "file": <base64 contents>}`.
///
/// Built only through `from_bytes` / `from_file`, so `file` is always
/// base64 of the contents.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UploadFile {
    path: String,
    file: String,
}

impl UploadFile {
    /// `path` is the destination relative to the station's media directory.
    pub fn from_bytes(path: impl Into<String>, contents: &[u8]) -> Result<Self> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(Error::client("upload destination path must not be empty"));
        }
        if path.split('/').any(|segment| segment == "..") {
            return Err(Error::client(format!(
                "upload destination {path:?} must stay inside the media directory"
            )));
        }
        Ok(Self {
            path,
            file: STANDARD.encode(contents),
        })
    }

    pub fn from_file(path: impl Into<String>, local: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read(local.as_ref())?;
        Self::from_bytes(path, &contents)
    }

    /// Destination relative to the station's media directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Base64 of the contents.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn decoded_len(&self) -> usize {
        let padding = self.file.bytes().rev().take_while(|b| *b == b'=').count();
        (self.file.len() / 4 * 3).saturating_sub(padding)
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("path", &self.path)
            .field("bytes", &self.decoded_len())
            .finish()
    }
}
