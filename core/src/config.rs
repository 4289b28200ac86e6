//! Client configuration.
//!
//! # Design
//! The page configuration carries both a plain and a secure API root. Which
//! one applies depends on the scheme of the page the client runs in, so
//! `ClientConfig::resolve` takes the origin explicitly and produces a single
//! immutable value that is then shared with every call site.

use serde::Deserialize;
use url::Url;

use crate::error::ApiError;

/// Discussion settings as they appear under the `page` key of the
/// application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSettings {
    #[serde(default)]
    pub discussion_api_root: Option<String>,
    #[serde(default)]
    pub secure_discussion_api_root: Option<String>,
    #[serde(default)]
    pub discussion_api_client_header: Option<String>,
}

/// The slice of application configuration this client reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageConfig {
    pub page: PageSettings,
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::Config(e.to_string()))
    }
}

/// The origin scheme of the page the client runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Secure,
    Insecure,
}

impl Origin {
    /// Classify a scheme such as `"https"` or `"https:"`.
    pub fn from_scheme(scheme: &str) -> Self {
        if scheme.trim_end_matches(':').eq_ignore_ascii_case("https") {
            Origin::Secure
        } else {
            Origin::Insecure
        }
    }

    /// Classify the origin of a full page URL.
    pub fn from_page_url(page_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(page_url)
            .map_err(|e| ApiError::Config(format!("page url {page_url:?}: {e}")))?;
        Ok(Self::from_scheme(url.scheme()))
    }

    pub fn is_secure(self) -> bool {
        self == Origin::Secure
    }
}

/// Resolved settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_root: String,
    client_header: String,
}

impl ClientConfig {
    pub fn new(api_root: &str, client_header: &str) -> Self {
        Self {
            api_root: api_root.to_string(),
            client_header: client_header.to_string(),
        }
    }

    /// Pick the API root matching `origin` and capture the client header.
    ///
    /// Fails if the chosen root or the client header is missing or blank.
    /// Values are kept exactly as configured.
    pub fn resolve(config: &PageConfig, origin: Origin) -> Result<Self, ApiError> {
        let page = &config.page;
        let (root, field) = if origin.is_secure() {
            (&page.secure_discussion_api_root, "page.secureDiscussionApiRoot")
        } else {
            (&page.discussion_api_root, "page.discussionApiRoot")
        };
        let root = required(root, field)?;
        let header = required(
            &page.discussion_api_client_header,
            "page.discussionApiClientHeader",
        )?;
        Ok(Self::new(root, header))
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn client_header(&self) -> &str {
        &self.client_header
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Config(format!("{field} is not set"))),
    }
}
