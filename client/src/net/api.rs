//! Browser transport and the configured API gateway.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): the transport refuses every request, since backend
//! calls are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses are passed through as responses; only fetch failures
//! become [`ApiError::Transport`]. Pages render the gateway's error message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};
#[cfg(feature = "hydrate")]
use session::Method;

use crate::util::storage::LocalStorage;

/// Backend base URL, fixed at build time. Empty means same-origin.
pub const BACKEND_URL: &str = match option_env!("PROJECTHUB_BACKEND_URL") {
    Some(url) => url,
    None => "",
};

/// The gateway every page uses.
pub type Api = ApiClient<BrowserTransport, LocalStorage>;

/// Build the gateway. Cheap: both halves are zero-sized handles.
#[must_use]
pub fn api() -> Api {
    ApiClient::new(BACKEND_URL, BrowserTransport, LocalStorage)
}

/// `fetch`-backed [`Transport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserTransport;

#[cfg(any(test, feature = "hydrate"))]
fn fetch_failed_message(url: &str, reason: &str) -> String {
    format!("request to {url} failed: {reason}")
}

/// A body that cannot be read is a transport failure, not an empty reply.
#[cfg(any(test, feature = "hydrate"))]
fn response_body<E: std::fmt::Display>(url: &str, body: Result<String, E>) -> Result<String, ApiError> {
    body.map_err(|e| ApiError::Transport(fetch_failed_message(url, &e.to_string())))
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = request.url.as_str();
            let mut builder = match request.method {
                Method::Get => Request::get(url),
                Method::Post => Request::post(url),
                Method::Put => Request::put(url),
                Method::Patch => Request::patch(url),
                Method::Delete => Request::delete(url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outgoing = match &request.body {
                Some(body) => builder.body(body.to_string()),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(fetch_failed_message(url, &e.to_string())))?;

            let resp = outgoing
                .send()
                .await
                .map_err(|e| ApiError::Transport(fetch_failed_message(url, &e.to_string())))?;
            let status = resp.status();
            let body = response_body(url, resp.text().await)?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available on server".to_owned()))
        }
    }
}
