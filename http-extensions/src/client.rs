//! HTTP client wrapper with JSON and authentication helpers.

use base64::Engine;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use parking_lot::RwLock;
use reqwest::Response;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::request::parse_header;
use crate::{
    HttpClientConfig, HttpClientError, JsonCodec, QueryString, RequestOptions, Result, build_url,
};

/// Content type of every JSON request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Thin wrapper over [`reqwest::Client`].
///
/// Adds a base URL, client-level default headers that can be changed after
/// construction (authentication), query string handling and JSON bodies.
/// Responses are returned exactly as the underlying client produced them;
/// use [`ReadJson`](crate::ReadJson) to decode them.
///
/// Clones share the same default headers. Configure authentication before
/// handing clones to concurrent tasks.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: Arc<RwLock<HeaderMap>>,
    codec: JsonCodec,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.gzip)
            .brotli(config.brotli);

        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        if let Some(proxy_config) = &config.proxy {
            url::Url::parse(&proxy_config.url)?;
            let mut proxy = reqwest::Proxy::all(&proxy_config.url)?;
            if let Some((username, password)) = &proxy_config.credentials {
                proxy = proxy.basic_auth(username, password);
            }
            builder = builder.proxy(proxy);
        }

        if let Some(base) = &config.base_url {
            url::Url::parse(base)?;
        }

        let mut default_headers = HeaderMap::with_capacity(config.default_headers.len());
        for (name, value) in &config.default_headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.append(name, value);
        }

        Ok(Self {
            inner: builder.build()?,
            base_url: config.base_url,
            default_headers: Arc::new(RwLock::new(default_headers)),
            codec: JsonCodec::new(config.json),
        })
    }

    /// Wrap an already configured reqwest client.
    ///
    /// Headers set on the reqwest client itself still apply to every request.
    pub fn from_reqwest(inner: reqwest::Client) -> Self {
        Self {
            inner,
            base_url: None,
            default_headers: Arc::new(RwLock::new(HeaderMap::new())),
            codec: JsonCodec::default(),
        }
    }

    /// Set the base URL prefixed to every request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;
        self.base_url = Some(base_url);
        Ok(self)
    }

    /// Replace the JSON codec used for request bodies.
    pub fn with_codec(mut self, codec: JsonCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Get the underlying reqwest client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Get the base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Get the JSON codec.
    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    /// Snapshot of the client-level default headers.
    pub fn default_headers(&self) -> HeaderMap {
        self.default_headers.read().clone()
    }

    /// Set a client-level default header, replacing any previous value.
    pub fn set_default_header(&self, name: &str, value: &str) -> Result<()> {
        let (name, value) = parse_header(name, value)?;
        self.default_headers.write().insert(name, value);
        Ok(())
    }

    /// Send `Authorization: Basic <base64(username:password)>` on every request.
    pub fn set_basic_auth(&self, username: &str, password: &str) -> Result<()> {
        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        self.set_authorization(format!("Basic {credentials}"))
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn set_bearer_token(&self, token: &str) -> Result<()> {
        self.set_authorization(format!("Bearer {token}"))
    }

    fn set_authorization(&self, value: String) -> Result<()> {
        let mut value = HeaderValue::try_from(value)
            .map_err(|e| HttpClientError::InvalidHeader(format!("authorization: {e}")))?;
        value.set_sensitive(true);
        self.default_headers.write().insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Build the full URL for a path relative to the base URL.
    pub fn url(&self, path: &str, query: Option<&QueryString>) -> String {
        build_url(self.base_url(), path, query)
    }

    /// Send a GET request.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.send::<()>(Method::GET, url, None, options).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<B>(&self, url: &str, body: &B, options: RequestOptions) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, Some(body), options).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<B>(&self, url: &str, body: &B, options: RequestOptions) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, url, Some(body), options).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch<B>(&self, url: &str, body: &B, options: RequestOptions) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, url, Some(body), options).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, url: &str, options: RequestOptions) -> Result<Response> {
        self.send::<()>(Method::DELETE, url, None, options).await
    }

    /// Send a DELETE request with a JSON body.
    ///
    /// Servers are not required to honor a DELETE body; only use this with
    /// endpoints documented to read one.
    pub async fn delete_with_body<B>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::DELETE, url, Some(body), options).await
    }

    /// Send a request, serializing `body` as JSON when present.
    ///
    /// Transport errors from reqwest are returned as
    /// [`HttpClientError::Http`]; the response status is not checked.
    pub async fn send<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(url, Some(options.query_string()));
        let headers = self.request_headers(&options)?;

        let mut request = self.inner.request(method.clone(), &url).headers(headers);

        let has_body = body.is_some();
        if let Some(body) = body {
            let json = self.codec.serialize(body)?;
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(json);
        }

        debug!(method = %method, url = %url, has_body, "Sending HTTP request");

        let response = request.send().await?;

        debug!(
            method = %method,
            url = %url,
            status = %response.status(),
            "Received HTTP response"
        );

        Ok(response)
    }

    /// Client defaults merged with the per-request headers.
    ///
    /// A header set on the request replaces the default of the same name for
    /// that request only.
    fn request_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let extra = options.header_map()?;
        let mut headers = self.default_headers();
        for name in extra.keys() {
            headers.remove(name);
        }
        for (name, value) in &extra {
            headers.append(name, value.clone());
        }
        Ok(headers)
    }
}
