//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `HttpRequest` is the request descriptor handed to a `Transport`: target
//! URL, verb, transport mode, headers and the flat payload. Encoding the
//! payload onto the wire is left to the transport; `query_url` and
//! `form_body` give every transport the same encoding.
//!
//! All fields use owned types so requests can be moved onto another thread
//! or stored by a recording transport without lifetime concerns.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::payload::Payload;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Map a loose verb string onto a method. Only an exact `"get"` reads;
    /// every other value is treated as a post.
    pub fn from_verb(verb: &str) -> Self {
        if verb == "get" {
            HttpMethod::Get
        } else {
            HttpMethod::Post
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Reads go out as JSONP, writes as JSON.
    pub fn mode(self) -> TransportMode {
        match self {
            HttpMethod::Get => TransportMode::Jsonp,
            HttpMethod::Post => TransportMode::Json,
        }
    }
}

/// How the transport should carry the request and read the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Jsonp,
    Json,
}

/// A request described as plain data, built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub mode: TransportMode,
    pub cross_origin: bool,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The URL with the payload, and an optional JSONP callback, appended as
    /// a urlencoded query string.
    pub fn query_url(&self, callback: Option<&str>) -> Result<String, ApiError> {
        let mut query = self.form_body()?;
        if let Some(callback) = callback {
            let callback = serde_urlencoded::to_string(&[("callback", callback)])
                .map_err(|e| ApiError::Serialization(e.to_string()))?;
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&callback);
        }

        if query.is_empty() {
            return Ok(self.url.clone());
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        Ok(format!("{}{separator}{query}", self.url))
    }

    /// The payload as an `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> Result<String, ApiError> {
        serde_urlencoded::to_string(&self.payload).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// A response described as plain data.
///
/// Produced by a `Transport` once the round-trip completes. JSONP bodies are
/// already unwrapped to their JSON text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body into `T`, mapping non-2xx statuses to `ApiError::Http`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Http {
                status: self.status,
                body: self.body.clone(),
            });
        }
        serde_json::from_str(&self.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: HttpMethod, url: &str, payload: Payload) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            mode: method.mode(),
            cross_origin: true,
            headers: vec![("GU-Client".to_string(), "web".to_string())],
            payload,
        }
    }

    #[test]
    fn only_exact_get_is_a_read() {
        assert_eq!(HttpMethod::from_verb("get"), HttpMethod::Get);
        assert_eq!(HttpMethod::from_verb("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::from_verb("GET"), HttpMethod::Post);
        assert_eq!(HttpMethod::from_verb("delete"), HttpMethod::Post);
        assert_eq!(HttpMethod::from_verb(""), HttpMethod::Post);
    }

    #[test]
    fn mode_follows_method() {
        assert_eq!(HttpMethod::Get.mode(), TransportMode::Jsonp);
        assert_eq!(HttpMethod::Post.mode(), TransportMode::Json);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request(HttpMethod::Get, "http://api/profile/me", Payload::new());
        assert_eq!(req.header("gu-client"), Some("web"));
        assert_eq!(req.header("D2-X-UID"), None);
    }

    #[test]
    fn query_url_without_fields_is_unchanged() {
        let req = request(HttpMethod::Get, "http://api/profile/me", Payload::new());
        assert_eq!(req.query_url(None).unwrap(), "http://api/profile/me");
    }

    #[test]
    fn query_url_appends_fields_and_callback() {
        let req = request(
            HttpMethod::Get,
            "http://api/profile/me",
            Payload::new().with("GU_U", "a b&c"),
        );
        assert_eq!(
            req.query_url(Some("cb_1")).unwrap(),
            "http://api/profile/me?GU_U=a+b%26c&callback=cb_1"
        );
    }

    #[test]
    fn query_url_extends_existing_query() {
        let req = request(HttpMethod::Get, "http://api/profile/me?x=1", Payload::new());
        assert_eq!(
            req.query_url(Some("cb")).unwrap(),
            "http://api/profile/me?x=1&callback=cb"
        );
    }

    #[test]
    fn form_body_encodes_payload() {
        let req = request(
            HttpMethod::Post,
            "/discussion/1/comment.json",
            Payload::new().with("body", "hi there").with("GU_U", "tok"),
        );
        assert_eq!(req.form_body().unwrap(), "GU_U=tok&body=hi+there");
    }

    #[test]
    fn form_body_renders_scalar_values() {
        let req = request(
            HttpMethod::Post,
            "/discussion/42/comment/7/reply.json",
            Payload::new()
                .with("replyTo[commentId]", 7u64)
                .with("isPremoderated", false)
                .with("score", 1.5),
        );
        assert_eq!(
            req.form_body().unwrap(),
            "isPremoderated=false&replyTo%5BcommentId%5D=7&score=1.5"
        );
    }

    #[test]
    fn empty_payload_encodes_to_empty_body() {
        let req = request(HttpMethod::Post, "/comment/1/recommend", Payload::new());
        assert_eq!(req.form_body().unwrap(), "");
    }

    #[test]
    fn json_rejects_error_status() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "missing".to_string(),
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
    }

    #[test]
    fn json_reports_bad_body() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
