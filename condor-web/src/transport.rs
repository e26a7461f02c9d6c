//! Browser fetch behind the core [`Transport`] seam.

use async_trait::async_trait;
use condor_core::{ApiError, HttpRequest, HttpResponse, Transport};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request could not be built: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("response body unreadable: {0}")]
    Body(String),
    #[error("fetch is only available in the browser")]
    Unsupported,
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Sends requests with `fetch` through `gloo-net`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FetchTransport {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, FetchError> {
    use condor_core::Method;
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|err| FetchError::Build(err.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| FetchError::Body(err.to_string()))?;
    Ok(HttpResponse::new(status, body))
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(clippy::unused_async)]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, FetchError> {
    log::debug!("dropping {} {} outside the browser", request.method, request.url);
    Err(FetchError::Unsupported)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let label = format!("{} {}", request.method, request.url);
        match fetch(request).await {
            Ok(response) => {
                log::debug!("{label} -> {}", response.status);
                Ok(response)
            }
            Err(err) => {
                log::warn!("{label} failed: {err}");
                Err(err.into())
            }
        }
    }
}
