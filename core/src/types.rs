//! Typed request and response shapes for the discussion endpoints.
//!
//! # Design
//! Fields the endpoints actually depend on are typed; everything else is
//! carried in a flattened map so new or rarely used fields pass through
//! without a schema change here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payload::{Payload, Value};

/// Numeric identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The comment a draft answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyTo {
    pub comment_id: CommentId,
}

/// A comment about to be posted.
///
/// `reply_to` chooses the reply endpoint and is also sent as the form field
/// `replyTo[commentId]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<ReplyTo>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CommentDraft {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn replying_to(mut self, comment_id: CommentId) -> Self {
        self.reply_to = Some(ReplyTo { comment_id });
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl From<&CommentDraft> for Payload {
    fn from(draft: &CommentDraft) -> Self {
        let mut payload: Payload = draft.extra.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        payload.insert("body", draft.body.clone());
        if let Some(reply_to) = &draft.reply_to {
            payload.insert("replyTo[commentId]", reply_to.comment_id.0);
        }
        payload
    }
}

/// Envelope returned by the write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// The id of a freshly posted comment, carried in `message`.
    pub fn comment_id(&self) -> Option<CommentId> {
        self.message.as_deref()?.trim().parse().ok().map(CommentId)
    }
}

/// A user's public discussion profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `/profile/{id}` and `/profile/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub status: String,
    pub user_profile: UserProfile,
}
