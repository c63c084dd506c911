// CatMusic - music search and download for the desktop
// Copyright (C) 2025 CatMusic contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP transport seam
//!
//! Every networked component in this crate talks to the outside world
//! through the [`HttpBackend`] trait instead of holding a reqwest client
//! directly. Production code uses [`ReqwestBackend`]; tests swap in
//! [`testing::FakeBackend`] to serve canned responses and assert on the
//! calls that were (or were not) made.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::Result;

/// A fully buffered HTTP response
///
/// The pipeline never streams bodies: the search envelope is small and a
/// downloaded track is written to disk as one buffered body, so buffering
/// here keeps the trait trivial to fake.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,
    /// Response body (empty for HEAD)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Status is exactly 200
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Content type contains `text/html`, case-insensitive
    ///
    /// A missing content type is not HTML; upstream media hosts routinely
    /// omit the header and those responses must still be accepted.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false)
    }
}

/// Async transport over the three verbs the pipeline uses
///
/// Per-request policy stays with the caller: the validation HEAD passes its
/// own short timeout, while POST and GET deliberately carry none and run on
/// transport defaults.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a form-encoded payload, following redirects
    async fn post_form(
        &self,
        url: &str,
        headers: &HeaderMap,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse>;

    /// HEAD with a per-request timeout, following redirects
    async fn head(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<HttpResponse>;

    /// GET the full body, following redirects
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse>;
}

/// Production backend over a shared [`reqwest::Client`]
///
/// The client sets no overall timeout and keeps reqwest's default redirect
/// policy (up to 10 hops). Invalid URLs surface as transport errors at send
/// time, which the pipeline collapses to the same rejection as any other
/// connection failure.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend with a fresh client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

/// Buffer a reqwest response into an [`HttpResponse`]
async fn into_response(response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_form(
        &self,
        url: &str,
        headers: &HeaderMap,
        form: &[(&'static str, String)],
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .form(&form)
            .send()
            .await?;
        into_response(response).await
    }

    async fn head(
        &self,
        url: &str,
        headers: &HeaderMap,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .head(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await?;
        into_response(response).await
    }

    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await?;
        into_response(response).await
    }
}

#[cfg(test)]
pub mod testing {
    //! Canned-response fake backend for unit tests
    //!
    //! Responses are matched by URL substring in registration order, with an
    //! optional default. Every call is recorded as a `"METHOD url"` string
    //! in a log shared across clones, so a test can hand a clone to a
    //! service and still assert afterwards on the calls that were made —
    //! including that none were. Configure routes before cloning; the
    //! routing table itself is not shared.

    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::CatMusicError;

    /// A prepared response for [`FakeBackend`]
    #[derive(Debug, Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub content_type: Option<String>,
        pub body: Vec<u8>,
    }

    impl CannedResponse {
        /// 200 with a JSON body
        pub fn ok_json(body: serde_json::Value) -> Self {
            Self {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: body.to_string().into_bytes(),
            }
        }

        /// 200 with an audio content type
        pub fn ok_audio(body: &[u8]) -> Self {
            Self {
                status: 200,
                content_type: Some("audio/mpeg".to_string()),
                body: body.to_vec(),
            }
        }

        /// An HTML page with the given status
        pub fn html(status: u16) -> Self {
            Self {
                status,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: b"<html></html>".to_vec(),
            }
        }

        /// An empty response with the given status and no content type
        pub fn status(status: u16) -> Self {
            Self {
                status,
                content_type: None,
                body: Vec::new(),
            }
        }

        fn into_http(self) -> HttpResponse {
            HttpResponse {
                status: self.status,
                content_type: self.content_type,
                body: self.body,
            }
        }
    }

    #[derive(Debug, Clone)]
    enum Route {
        Respond(CannedResponse),
        FailTransport,
    }

    /// In-memory [`HttpBackend`] serving canned responses
    #[derive(Debug, Clone, Default)]
    pub struct FakeBackend {
        routes: Vec<(String, Route)>,
        fallback: Option<Route>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `response` for any URL containing `url_contains`
        pub fn with_response(mut self, url_contains: &str, response: CannedResponse) -> Self {
            self.routes
                .push((url_contains.to_string(), Route::Respond(response)));
            self
        }

        /// Serve `response` for any URL without a specific match
        pub fn with_default(mut self, response: CannedResponse) -> Self {
            self.fallback = Some(Route::Respond(response));
            self
        }

        /// Fail with a transport error for any URL containing `url_contains`
        pub fn with_transport_failure(mut self, url_contains: &str) -> Self {
            self.routes
                .push((url_contains.to_string(), Route::FailTransport));
            self
        }

        /// Every call made so far, oldest first
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of calls made so far
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Record the call, then answer from the routing table. Unmatched
        /// URLs with no default get a bare 404.
        fn handle(&self, method: &str, url: &str) -> Result<HttpResponse> {
            self.calls.lock().unwrap().push(format!("{method} {url}"));

            let route = self
                .routes
                .iter()
                .find(|(needle, _)| url.contains(needle.as_str()))
                .map(|(_, route)| route.clone())
                .or_else(|| self.fallback.clone());

            match route {
                Some(Route::Respond(canned)) => Ok(canned.into_http()),
                Some(Route::FailTransport) => Err(CatMusicError::Transport(format!(
                    "connection refused: {url}"
                ))),
                None => Ok(CannedResponse::status(404).into_http()),
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_form(
            &self,
            url: &str,
            _headers: &HeaderMap,
            _form: &[(&'static str, String)],
        ) -> Result<HttpResponse> {
            self.handle("POST", url)
        }

        async fn head(
            &self,
            url: &str,
            _headers: &HeaderMap,
            _timeout: Duration,
        ) -> Result<HttpResponse> {
            self.handle("HEAD", url)
        }

        async fn get(&self, url: &str, _headers: &HeaderMap) -> Result<HttpResponse> {
            self.handle("GET", url)
        }
    }
}

// ===== TESTS =====
