//! Fixed option sets accepted by the API.
//!
//! Every set is a closed enum, so an invalid value cannot reach the wire.
//! Parsing user-supplied strings (`FromStr`) reports `Error::Client`, which
//! is how values coming from configuration files or command lines are
//! validated before any request.
//!
//! Records read back from the server wrap these sets in [`Lenient`], so a
//! value added by a newer server version decodes instead of failing the
//! whole response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declares a string-valued enum with its wire names.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::Error::client(format!(
                        "{:?} is not a valid {}; expected one of: {}",
                        other,
                        $label,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_enum;

/// A server-reported value of a fixed option set.
///
/// Values outside the set are kept verbatim and serialized back unchanged,
/// so editing a record never rewrites what this client does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Unknown(Value),
}

impl<T> Lenient<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Lenient::Known(value) => Some(value),
            Lenient::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Lenient::Known(_))
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Known(value)
    }
}

impl<T: fmt::Display> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lenient::Known(value) => value.fmt(f),
            Lenient::Unknown(Value::String(raw)) => f.write_str(raw),
            Lenient::Unknown(other) => write!(f, "{other}"),
        }
    }
}

mod country;
mod format;
mod language;
mod permission;
mod webhook;
mod weekday;

pub use country::{country_name, CountryCode, COUNTRIES};
pub use format::{AudioFormat, Bitrate};
pub use language::{language_name, LanguageCode, LANGUAGES};
pub use permission::{GlobalPermission, StationPermission};
pub use webhook::{WebhookTrigger, WebhookType};
pub use weekday::DayOfWeek;
