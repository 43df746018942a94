//! Typed synchronous client for the AzuraCast radio management API.
//!
//! # Overview
//! The crate turns API resources (stations, playlists, podcasts, webhooks,
//! listener and queue telemetry, administrative settings) into typed
//! structs, checks caller-supplied arguments before any request, and maps
//! every HTTP outcome onto one `Error` variant.
//!
//! # Design
//! - `Dispatcher` issues exactly one request per call and classifies the
//!   response. HTML scraping for error and login pages lives in `html`.
//! - `Transport` is the I/O seam. `UreqTransport` is the default; tests
//!   inject scripted transports.
//! - Editable records are wrapped in `Handle<T>`, which gives every resource
//!   the same partial-update and tombstone-on-delete behaviour.
//! - URL templates are a closed `Endpoint` enum; contexts (`Session`,
//!   `StationContext`, `PodcastContext`) supply the placeholder values.
//!
//! ```no_run
//! use azuracast_core::{AzuraCastClient, ClientConfig};
//!
//! # fn main() -> azuracast_core::Result<()> {
//! let client = AzuraCastClient::new(&ClientConfig::from_env()?)?;
//! for np in client.now_playing_all()? {
//!     println!("{}: {} listeners", np.station.name, np.listeners.current);
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod client;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod endpoints;
pub mod enums;
pub mod error;
pub mod html;
pub mod http;
pub mod resource;
pub mod station;
pub mod types;
pub mod upload;

pub use client::AzuraCastClient;
pub use config::ClientConfig;
pub use context::{Context, PodcastContext, Session, StationContext};
pub use dispatcher::Dispatcher;
pub use endpoints::{Endpoint, UrlParams};
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use resource::{Creatable, Editable, Handle, Resource};
pub use station::{ServiceAction, Station};
pub use upload::UploadFile;
