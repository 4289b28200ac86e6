//! The seam between request building and network I/O.
//!
//! # Design
//! `DiscussionClient` never performs I/O itself. It hands each `HttpRequest`
//! to a `Transport` and returns the transport's future untouched, so success
//! and failure are whatever the transport says they are. `UreqTransport` is
//! a ready-made implementation for native hosts.

use std::future::Future;

use crate::http::HttpRequest;
use crate::http::HttpResponse;

/// Executes requests built by `DiscussionClient`.
pub trait Transport {
    type Error;
    type Future: Future<Output = Result<HttpResponse, Self::Error>>;

    fn dispatch(&self, request: HttpRequest) -> Self::Future;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;
    type Future = T::Future;

    fn dispatch(&self, request: HttpRequest) -> Self::Future {
        (**self).dispatch(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::{UreqFuture, UreqTransport};

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;

    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse, TransportMode};
    use crate::jsonp;

    use super::Transport;

    pub type UreqFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, ApiError>> + Send>>;

    /// Blocking `ureq` agent driven from tokio's blocking pool.
    ///
    /// Must be polled inside a tokio runtime. Non-2xx statuses come back as
    /// `HttpResponse` values, not errors. Same-origin requests (bare paths)
    /// are resolved against `origin` when one is set.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        origin: Option<String>,
    }

    impl fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("UreqTransport")
                .field("origin", &self.origin)
                .finish_non_exhaustive()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self {
                agent,
                origin: None,
            }
        }

        /// Resolve bare paths against `origin`, standing in for the page.
        pub fn with_origin(mut self, origin: &str) -> Self {
            self.origin = Some(origin.trim_end_matches('/').to_string());
            self
        }

        pub(crate) fn resolve(&self, mut request: HttpRequest) -> HttpRequest {
            if let Some(origin) = &self.origin {
                if request.url.starts_with('/') {
                    request.url = format!("{origin}{}", request.url);
                }
            }
            request
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        type Error = ApiError;
        type Future = UreqFuture;

        fn dispatch(&self, request: HttpRequest) -> UreqFuture {
            let agent = self.agent.clone();
            let request = self.resolve(request);
            Box::pin(async move {
                tokio::task::spawn_blocking(move || execute(&agent, &request))
                    .await
                    .map_err(|e| ApiError::Transport(e.to_string()))?
            })
        }
    }

    fn execute(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        match request.mode {
            TransportMode::Jsonp => {
                let callback = jsonp::callback_name();
                let mut builder = agent.get(request.query_url(Some(&callback))?);
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                let response = read(builder.call().map_err(transport_error)?)?;
                if !response.is_success() {
                    return Ok(response);
                }
                let body = jsonp::unwrap(&response.body, &callback)?.to_string();
                Ok(HttpResponse { body, ..response })
            }
            TransportMode::Json => {
                let mut builder = agent.post(request.url.as_str());
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                let response = builder
                    .content_type("application/x-www-form-urlencoded")
                    .send(request.form_body()?.as_bytes())
                    .map_err(transport_error)?;
                read(response)
            }
        }
    }

    fn read(mut response: ureq::http::Response<ureq::Body>) -> Result<HttpResponse, ApiError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.body_mut().read_to_string().map_err(transport_error)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn transport_error(e: ureq::Error) -> ApiError {
        ApiError::Transport(e.to_string())
    }
}
