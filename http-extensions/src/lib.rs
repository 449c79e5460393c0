//! # HTTP Extensions
//!
//! Fluent helpers on top of [`reqwest`]: query strings with repeated keys,
//! base URL composition, JSON request bodies, JSON response decoding and
//! client-level authentication headers.
//!
//! ## Features
//!
//! - **Query Strings**: Ordered, form-encoded, duplicate keys preserved
//! - **URL Building**: Base URL and path joined with exactly one `/`
//! - **JSON Bodies**: camelCase keys and `null` members dropped by default
//! - **JSON Responses**: Content type checked, empty bodies decode to `None`
//! - **Authentication**: Basic and Bearer default headers
//!
//! Retries, timeouts policy, pooling and TLS are left to reqwest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use http_extensions::{HttpClient, HttpClientConfig, ReadJson, RequestOptions};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Todo {
//!     id: u32,
//!     title: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("https://api.example.com")
//!         .build();
//!     let client = HttpClient::new(config)?;
//!     client.set_bearer_token("abc123")?;
//!
//!     let options = RequestOptions::new()
//!         .query("status", "completed")
//!         .header("X-Todo-ApiKey", "123");
//!     let response = client.get("/todos/1", options).await?;
//!     let todo: Option<Todo> = response.read_json().await?;
//!
//!     let created = Todo { id: 2, title: "Remember the milk".into() };
//!     let response = client.post("/todos", &created, RequestOptions::default()).await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod field_names;
mod query;
mod request;
mod response;
mod serialization;
mod url_builder;

pub use client::{HttpClient, JSON_CONTENT_TYPE};
pub use config::{HttpClientConfig, HttpClientConfigBuilder, ProxyConfig};
pub use error::{HttpClientError, Result};
pub use query::QueryString;
pub use request::RequestOptions;
pub use response::{JSON_MEDIA_TYPE, ReadJson, media_type};
pub use serialization::{JsonCodec, JsonSettings, PropertyNaming};
pub use url_builder::build_url;

// Re-export common types
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use reqwest::Response;

/// Prelude for common imports.
///
/// ```
/// use http_extensions::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder, ProxyConfig};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::query::QueryString;
    pub use crate::request::RequestOptions;
    pub use crate::response::ReadJson;
    pub use crate::serialization::{JsonCodec, JsonSettings, PropertyNaming};
    pub use crate::url_builder::build_url;
    pub use http::{HeaderMap, Method, StatusCode, header};
}
