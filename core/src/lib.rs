//! Typed client core for the WaniKani v2 REST API.
//!
//! # Overview
//! Fetches the first page of each configured endpoint, routes every raw
//! response to the schema its URL selects, decodes it and stores it in a
//! local `Account` snapshot. A refresh cycle reports completion exactly once,
//! after every request has settled, with the first error it encountered.
//!
//! # Design
//! - Host-does-IO at the core: `WaniKaniClient` builds `HttpRequest` values
//!   and `Session::handle_response` consumes outcomes, so the whole pipeline
//!   is deterministic and testable without a network.
//! - `Session::run_refresh` drives the same state machine over any async
//!   `Transport` (a `reqwest` one ships behind the `reqwest` feature; its
//!   tests run with `cargo test --features reqwest`).
//! - `SchemaRegistry` is an ordered list scanned first-match-wins; order is
//!   part of the contract because URL rules can overlap.
//! - `Account` serializes to JSON for whatever key-value store the host has.

pub mod account;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod schema;
pub mod session;
pub mod tracker;
pub mod transport;
pub mod types;

pub use account::{Account, AccountStore};
pub use classify::classify_and_decode;
pub use client::WaniKaniClient;
pub use config::ClientConfig;
pub use error::{ConfigError, DecodeError, PersistError, SyncError, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use schema::{Kind, Payload, SchemaDescriptor, SchemaRegistry, UrlRule};
pub use session::{
    DecodeErrorLogger, Exchange, Handled, RefreshState, ResponseLogger, Session,
};
pub use tracker::RequestTracker;
pub use transport::Transport;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use types::{Collection, PagesInfo, Resource};
