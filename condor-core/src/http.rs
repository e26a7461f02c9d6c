//! Request plumbing shared by every backend client.
//!
//! [`ApiClient`] owns the cross-cutting behaviour: bearer token attachment, token
//! eviction on 401 and mapping non-2xx responses into [`ApiError::Http`]. The actual
//! network hop sits behind [`Transport`] so the same client runs in the browser, in
//! native tests and in the tester binary.

use crate::config::{ApiConfig, Backend};
use crate::error::ApiError;
use crate::storage::{KeyValueStore, keys};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Path component of the URL, without origin or query string.
    #[must_use]
    pub fn path(&self) -> &str {
        let without_origin = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, rest)| {
                rest.find('/').map_or("/", |idx| &rest[idx..])
            });
        without_origin
            .split_once('?')
            .map_or(without_origin, |(path, _)| path)
    }

    /// Decoded value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
        })
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] when there is no body or it is not valid JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| ApiError::Decode("request has no body".into()))?;
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The network hop. Implementations report only transport-level failures; HTTP error
/// statuses come back as ordinary responses.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    store: Rc<dyn KeyValueStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            store,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    #[must_use]
    pub fn patch(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Patch, path)
    }

    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// `GET path` decoded as JSON.
    ///
    /// # Errors
    /// See [`RequestBuilder::fetch_json`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path).fetch_json().await
    }

    /// `POST path` with a JSON body; a blank or non-JSON answer decodes to `None`.
    ///
    /// # Errors
    /// See [`RequestBuilder::fetch_lenient`].
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post(path).json(body)?.fetch_lenient().await
    }

    /// # Errors
    /// See [`RequestBuilder::fetch_lenient`].
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put(path).json(body)?.fetch_lenient().await
    }

    /// # Errors
    /// See [`RequestBuilder::fetch_empty`].
    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.patch(path).json(body)?.fetch_empty().await
    }

    /// `PATCH path` with the text itself as body, as the route field endpoints expect.
    ///
    /// # Errors
    /// See [`RequestBuilder::fetch_empty`].
    pub async fn patch_text(&self, path: &str, text: &str) -> Result<(), ApiError> {
        self.patch(path).raw(text).fetch_empty().await
    }

    /// `PATCH path?key=value` with no body.
    ///
    /// # Errors
    /// See [`RequestBuilder::fetch_empty`].
    pub async fn patch_query(&self, path: &str, key: &str, value: &str) -> Result<(), ApiError> {
        self.patch(path).query(key, value).fetch_empty().await
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        if response.status == 401 {
            log::info!("401 from {}; clearing stored token", self.base_url);
            self.store.remove(keys::TOKEN);
        }
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::http(response.status, response.body))
        }
    }
}

pub struct RequestBuilder<'a> {
    client: &'a ApiClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestBuilder<'_> {
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn header_opt(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns [`ApiError::Encode`] if the payload cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let encoded =
            serde_json::to_string(body).map_err(|err| ApiError::Encode(err.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Send `body` verbatim (bare strings and numbers some endpoints expect).
    #[must_use]
    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn build(self) -> HttpRequest {
        let mut url = format!("{}{}", self.client.base_url, self.path);
        if !self.query.is_empty() {
            let encoded: Vec<String> = self
                .query
                .iter()
                .map(|(key, value)| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(key, NON_ALPHANUMERIC),
                        utf8_percent_encode(value, NON_ALPHANUMERIC)
                    )
                })
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }

        let mut headers = Vec::with_capacity(self.headers.len() + 2);
        if self.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self
            .client
            .store
            .get(keys::TOKEN)
            .filter(|token| !token.trim().is_empty())
        {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers.extend(self.headers);

        HttpRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        }
    }

    /// Send the request and hand back the successful response.
    ///
    /// # Errors
    /// Returns the transport failure or [`ApiError::Http`] for non-2xx statuses.
    pub async fn send(self) -> Result<HttpResponse, ApiError> {
        let client = self.client;
        client.execute(self.build()).await
    }

    /// Send and decode a JSON response body.
    ///
    /// # Errors
    /// Propagates [`Self::send`] failures and [`ApiError::Decode`] for bad payloads.
    pub async fn fetch_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let response = self.send().await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Like [`Self::fetch_json`] but a blank body decodes to `None`.
    ///
    /// # Errors
    /// Propagates [`Self::send`] failures and [`ApiError::Decode`] for bad payloads.
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, ApiError> {
        let response = self.send().await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&response.body)?))
    }

    /// Like [`Self::fetch_optional`] but an undecodable body is logged and treated as absent.
    /// For write endpoints whose answer is informational only.
    ///
    /// # Errors
    /// Propagates [`Self::send`] failures.
    pub async fn fetch_lenient<T: DeserializeOwned>(self) -> Result<Option<T>, ApiError> {
        let response = self.send().await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::debug!("ignoring undecodable response body: {err}");
                Ok(None)
            }
        }
    }

    /// Send and discard whatever the server answered.
    ///
    /// # Errors
    /// Propagates [`Self::send`] failures.
    pub async fn fetch_empty(self) -> Result<(), ApiError> {
        self.send().await.map(|_| ())
    }
}

/// Builds one configured [`ApiClient`] per backend, all sharing transport and storage.
#[derive(Clone)]
pub struct ClientFactory {
    config: ApiConfig,
    transport: Rc<dyn Transport>,
    store: Rc<dyn KeyValueStore>,
}

impl ClientFactory {
    #[must_use]
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    #[must_use]
    pub fn client(&self, backend: Backend) -> ApiClient {
        ApiClient::new(
            self.config.base_url(backend),
            Rc::clone(&self.transport),
            Rc::clone(&self.store),
        )
    }

    #[must_use]
    pub fn store(&self) -> Rc<dyn KeyValueStore> {
        Rc::clone(&self.store)
    }
}
