//! JSON decoding of responses.

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use crate::{HttpClientError, JsonCodec, Result};

/// The only media type accepted by [`ReadJson`].
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Extension trait decoding a response body as JSON.
///
/// A response without content decodes to `None`. A response with content
/// must declare `application/json` (parameters such as `charset` are
/// ignored), otherwise [`HttpClientError::UnsupportedContentType`] is
/// returned.
///
/// ```rust,no_run
/// use http_extensions::{HttpClient, HttpClientConfig, ReadJson, RequestOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Todo {
///     id: u32,
///     title: String,
/// }
///
/// # async fn run() -> http_extensions::Result<()> {
/// let client = HttpClient::new(HttpClientConfig::default())?;
/// let response = client
///     .get("https://example.com/todos/1", RequestOptions::default())
///     .await?;
///
/// if let Some(todo) = response.read_json::<Todo>().await? {
///     println!("{}: {}", todo.id, todo.title);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ReadJson: Sized {
    /// Decode the body with the default [`JsonCodec`].
    async fn read_json<T>(self) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send;

    /// Decode the body with the given codec.
    async fn read_json_with<T>(self, codec: &JsonCodec) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send;
}

#[async_trait]
impl ReadJson for reqwest::Response {
    async fn read_json<T>(self) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.read_json_with(&JsonCodec::default()).await
    }

    async fn read_json_with<T>(self, codec: &JsonCodec) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        if !has_content(self.status(), self.content_length()) {
            trace!(status = %self.status(), "Response has no content");
            return Ok(None);
        }

        let media_type = media_type(self.headers());
        if let Some(media_type) = &media_type {
            check_media_type(media_type)?;
        }

        let body = self.bytes().await?;
        decode_body(media_type.as_deref(), &body, codec)
    }
}

/// Extract the media type of a `Content-Type` header, lowercased and
/// without parameters.
pub fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = String::from_utf8_lossy(headers.get(CONTENT_TYPE)?.as_bytes());
    let media_type = value.split(';').next().unwrap_or_default().trim();
    if media_type.is_empty() {
        None
    } else {
        Some(media_type.to_ascii_lowercase())
    }
}

fn has_content(status: StatusCode, content_length: Option<u64>) -> bool {
    status != StatusCode::NO_CONTENT
        && status != StatusCode::NOT_MODIFIED
        && content_length != Some(0)
}

fn check_media_type(media_type: &str) -> Result<()> {
    if media_type == JSON_MEDIA_TYPE {
        return Ok(());
    }
    warn!(media_type, "Rejecting response with non-JSON content type");
    Err(HttpClientError::UnsupportedContentType(media_type.to_string()))
}

/// Decode a fully read body given its declared media type.
fn decode_body<T: DeserializeOwned>(
    media_type: Option<&str>,
    body: &[u8],
    codec: &JsonCodec,
) -> Result<Option<T>> {
    if body.trim_ascii().is_empty() {
        trace!("Response body is empty");
        return Ok(None);
    }

    match media_type {
        Some(media_type) => check_media_type(media_type)?,
        None => {
            warn!("Rejecting response body without content type");
            return Err(HttpClientError::UnsupportedContentType(String::new()));
        }
    }

    codec.deserialize_slice(body)
}
