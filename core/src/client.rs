//! Request builder and dispatcher for the discussion API.
//!
//! # Design
//! `DiscussionClient` holds a shared `ClientConfig`, a `Transport` and a
//! `CookieSource`, and carries no mutable state between calls. Every
//! endpoint has a `build_*` method that produces an `HttpRequest` without
//! touching the network, and a dispatching method that passes that request
//! to the transport and returns the transport's future as-is.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::cookie::{CookieSource, IDENTITY_COOKIE};
use crate::http::{HttpMethod, HttpRequest};
use crate::payload::Payload;
use crate::transport::Transport;
use crate::types::{CommentDraft, CommentId, UserId};

/// Header carrying the fixed client tag.
pub const UID_HEADER: &str = "D2-X-UID";

/// Fixed value of `D2-X-UID`. It does not identify the user.
pub const CLIENT_UID: &str = "zHoBy6HNKsk";

/// Header carrying the configured client name.
pub const CLIENT_HEADER: &str = "GU-Client";

/// Where a request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Prefixed with the configured API root.
    #[default]
    External,
    /// Sent to the bare endpoint, proxied through the page's own origin.
    Internal,
}

/// Per-request options for `DiscussionClient::send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub target: Target,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: HttpMethod::Get,
            target: Target::External,
        }
    }

    pub fn post() -> Self {
        Self {
            method: HttpMethod::Post,
            target: Target::External,
        }
    }

    pub fn internal(self) -> Self {
        Self {
            target: Target::Internal,
            ..self
        }
    }
}

/// Client for the discussion API.
#[derive(Debug, Clone)]
pub struct DiscussionClient<T, C> {
    config: Arc<ClientConfig>,
    transport: T,
    cookies: C,
}

impl<T, C: CookieSource> DiscussionClient<T, C> {
    pub fn new(config: Arc<ClientConfig>, transport: T, cookies: C) -> Self {
        Self {
            config,
            transport,
            cookies,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request `send` would dispatch.
    ///
    /// The identity cookie, when set, is merged into a copy of `payload`.
    pub fn build_request(
        &self,
        endpoint: &str,
        options: RequestOptions,
        payload: &Payload,
    ) -> HttpRequest {
        let payload = match self.cookies.cookie(IDENTITY_COOKIE) {
            Some(identity) => payload.merged(IDENTITY_COOKIE, identity),
            None => payload.clone(),
        };
        let url = match options.target {
            Target::External => format!("{}{endpoint}", self.config.api_root()),
            Target::Internal => endpoint.to_string(),
        };
        HttpRequest {
            method: options.method,
            url,
            mode: options.method.mode(),
            cross_origin: true,
            headers: vec![
                (UID_HEADER.to_string(), CLIENT_UID.to_string()),
                (CLIENT_HEADER.to_string(), self.config.client_header().to_string()),
            ],
            payload,
        }
    }

    pub fn build_post_comment(&self, discussion_id: &str, draft: &CommentDraft) -> HttpRequest {
        self.build_request(
            &comment_endpoint(discussion_id, draft),
            RequestOptions::post().internal(),
            &Payload::from(draft),
        )
    }

    pub fn build_recommend_comment(&self, id: CommentId) -> HttpRequest {
        self.build_request(
            &format!("/comment/{id}/recommend"),
            RequestOptions::post(),
            &Payload::new(),
        )
    }

    pub fn build_pick_comment(&self, id: CommentId) -> HttpRequest {
        self.build_request(
            &format!("/comment/{id}/highlight"),
            RequestOptions::post(),
            &Payload::new(),
        )
    }

    pub fn build_unpick_comment(&self, id: CommentId) -> HttpRequest {
        self.build_request(
            &format!("/comment/{id}/unhighlight"),
            RequestOptions::post(),
            &Payload::new(),
        )
    }

    /// `None` (or the unset id `0`) asks for the signed-in user. `/profile/me`
    /// caches worse than an explicit id, so pass one when it is known.
    pub fn build_get_user(&self, id: Option<UserId>) -> HttpRequest {
        let endpoint = match id.filter(|id| id.0 != 0) {
            Some(id) => format!("/profile/{id}"),
            None => "/profile/me".to_string(),
        };
        self.build_request(&endpoint, RequestOptions::get(), &Payload::new())
    }
}

impl<T: Transport, C: CookieSource> DiscussionClient<T, C> {
    /// Build a request for `endpoint` and hand it to the transport.
    pub fn send(&self, endpoint: &str, options: RequestOptions, payload: &Payload) -> T::Future {
        self.dispatch(self.build_request(endpoint, options, payload))
    }

    pub fn post_comment(&self, discussion_id: &str, draft: &CommentDraft) -> T::Future {
        self.dispatch(self.build_post_comment(discussion_id, draft))
    }

    pub fn recommend_comment(&self, id: CommentId) -> T::Future {
        self.dispatch(self.build_recommend_comment(id))
    }

    pub fn pick_comment(&self, id: CommentId) -> T::Future {
        self.dispatch(self.build_pick_comment(id))
    }

    pub fn unpick_comment(&self, id: CommentId) -> T::Future {
        self.dispatch(self.build_unpick_comment(id))
    }

    pub fn get_user(&self, id: Option<UserId>) -> T::Future {
        self.dispatch(self.build_get_user(id))
    }

    fn dispatch(&self, request: HttpRequest) -> T::Future {
        tracing::debug!(
            method = request.method.as_str(),
            url = %request.url,
            identified = request.payload.contains_key(IDENTITY_COOKIE),
            "dispatching discussion request"
        );
        self.transport.dispatch(request)
    }
}

fn comment_endpoint(discussion_id: &str, draft: &CommentDraft) -> String {
    match &draft.reply_to {
        Some(reply_to) => format!(
            "/discussion/{discussion_id}/comment/{}/reply.json",
            reply_to.comment_id
        ),
        None => format!("/discussion/{discussion_id}/comment.json"),
    }
}
