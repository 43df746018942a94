use std::fmt;

use serde::{Deserialize, Serialize};

use super::string_enum;
use crate::error::Error;

string_enum! {
    /// Encoding used by AutoDJ mounts, relays and HLS streams.
    pub enum AudioFormat ("audio format") {
        Mp3 => "mp3",
        Ogg => "ogg",
        Aac => "aac",
        Opus => "opus",
        Flac => "flac",
    }
}

/// Encoder bitrate in kbps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Bitrate {
    Kbps32,
    Kbps48,
    Kbps64,
    Kbps96,
    Kbps128,
    Kbps192,
    Kbps256,
    Kbps320,
}

impl Bitrate {
    pub const ALL: &'static [Bitrate] = &[
        Bitrate::Kbps32,
        Bitrate::Kbps48,
        Bitrate::Kbps64,
        Bitrate::Kbps96,
        Bitrate::Kbps128,
        Bitrate::Kbps192,
        Bitrate::Kbps256,
        Bitrate::Kbps320,
    ];

    pub fn kbps(self) -> u16 {
        match self {
            Bitrate::Kbps32 => 32,
            Bitrate::Kbps48 => 48,
            Bitrate::Kbps64 => 64,
            Bitrate::Kbps96 => 96,
            Bitrate::Kbps128 => 128,
            Bitrate::Kbps192 => 192,
            Bitrate::Kbps256 => 256,
            Bitrate::Kbps320 => 320,
        }
    }
}

impl TryFrom<u16> for Bitrate {
    type Error = Error;

    fn try_from(kbps: u16) -> Result<Self, Self::Error> {
        Bitrate::ALL
            .iter()
            .copied()
            .find(|b| b.kbps() == kbps)
            .ok_or_else(|| {
                Error::client(format!(
                    "{kbps} kbps is not a supported bitrate; expected one of 32, 48, 64, 96, 128, 192, 256, 320"
                ))
            })
    }
}

impl From<Bitrate> for u16 {
    fn from(bitrate: Bitrate) -> u16 {
        bitrate.kbps()
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kbps", self.kbps())
    }
}
