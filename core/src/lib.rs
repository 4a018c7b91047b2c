//! Client-side synchronization core for the blog post API.
//!
//! # Overview
//! Two cooperating pieces:
//! - `PostClient` / `ResourceClient` translate the five logical operations
//!   (list, get, create, update, delete) into HTTP exchanges and fold every
//!   failure into one `ClientError` per operation.
//! - The screen state machines (`ListScreen`, `CreateScreen`, `EditScreen`,
//!   `DetailScreen`) hold exactly one `ViewState` each and decide which
//!   requests may be issued and how their results are reconciled.
//!
//! # Design
//! - Host-does-IO: `PostClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network. Screens emit
//!   ticketed `Command`s and accept the resolved exchange back, so the whole
//!   core is deterministic and runs on a single thread.
//! - `Transport` is the seam where a host plugs in real IO. `UreqTransport`
//!   (feature `ureq`, on by default) is a blocking implementation.
//! - There is no cache: every screen owns its own copy of the data and
//!   re-fetches when opened.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod screens;
pub mod transport;
pub mod types;
pub mod view;

#[cfg(feature = "ureq")]
pub mod agent;

pub use client::{Operation, PostClient};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use screens::{CreateScreen, DetailScreen, EditScreen, ListScreen};
pub use transport::{Exchange, ResourceClient, Transport};
pub use types::{Field, Post, PostFields, PostId};
pub use view::{Command, Failure, Redirect, Ticket, View, ViewState};

#[cfg(feature = "ureq")]
pub use agent::UreqTransport;
