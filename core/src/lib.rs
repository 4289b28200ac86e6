//! Client core for the discussion API.
//!
//! # Overview
//! Builds requests for the discussion endpoints (post, recommend, pick and
//! unpick comments, fetch profiles), attaches the identity cookie and client
//! headers, and hands them to a pluggable `Transport`. The caller gets the
//! transport's future back untouched.
//!
//! # Design
//! - `ClientConfig` is resolved once from page configuration and shared via
//!   `Arc`; nothing is global.
//! - Each endpoint has a pure `build_*` method and a dispatching method, so
//!   hosts can either do the I/O themselves or plug in a transport.
//! - Payloads are flat and never mutated in place; the identity cookie is
//!   merged into a copy.
//! - `UreqTransport` (feature `ureq`, on by default) is a ready-made native
//!   transport; browser hosts bring their own.

pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod http;
pub mod jsonp;
pub mod payload;
pub mod transport;
pub mod types;

pub use client::{DiscussionClient, RequestOptions, Target};
pub use config::{ClientConfig, Origin, PageConfig};
pub use cookie::{CookieHeader, CookieSource, NoCookies, IDENTITY_COOKIE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportMode};
pub use payload::{Payload, Value};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{CommentDraft, CommentId, ProfileResponse, StatusResponse, UserId, UserProfile};
