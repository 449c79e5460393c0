//! Ordered, multi-value query string collection.

use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

use crate::{HttpClientError, Result};

/// An ordered collection of query string parameters.
///
/// Duplicate keys are kept in insertion order, so `param=3&param=4` can be
/// expressed by adding `param` twice. Rendering with [`fmt::Display`] never
/// mutates the collection.
///
/// ```
/// use http_extensions::QueryString;
///
/// let mut query = QueryString::new();
/// query.add("param1", "a value");
/// query.add("param2", "3");
/// query.add("param2", "4");
///
/// assert_eq!(query.to_string(), "param1=a+value&param2=3&param2=4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Create an empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query string from any value `serde_urlencoded` can encode,
    /// such as a flat struct or a sequence of pairs.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(value).map_err(HttpClientError::QueryEncoding)?;
        Ok(form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect())
    }

    /// Append a parameter.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Number of parameters, counting duplicates.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All values recorded for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        f.write_str(&serializer.finish())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for QueryString
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'a> IntoIterator for &'a QueryString {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
