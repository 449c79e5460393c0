//! Per-request options.

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::{HttpClientError, QueryString, Result};

/// Optional query string and headers for a single request.
///
/// The default value carries no query parameters and no headers.
///
/// ```
/// use http_extensions::RequestOptions;
///
/// let options = RequestOptions::new()
///     .query("status", "completed")
///     .header("X-Todo-ApiKey", "123");
/// assert_eq!(options.query_string().to_string(), "status=completed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: QueryString,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(key, value);
        self
    }

    /// Append every parameter of an existing query string.
    pub fn with_query(mut self, query: QueryString) -> Self {
        self.query.extend(query.iter());
        self
    }

    /// Add a header sent with this request only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers sent with this request only.
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.push((name.into(), value.into()));
        }
        self
    }

    /// Get the query string.
    pub fn query_string(&self) -> &QueryString {
        &self.query
    }

    /// Validate the headers and collect them into a header map.
    ///
    /// Names are case-insensitive; a name given twice keeps both values.
    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let (name, value) = parse_header(name, value)?;
            map.append(name, value);
        }
        Ok(map)
    }
}

impl From<QueryString> for RequestOptions {
    fn from(query: QueryString) -> Self {
        Self {
            query,
            headers: Vec::new(),
        }
    }
}

/// Parse a header name/value pair.
pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::try_from(name)
        .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
    let header_value = HeaderValue::try_from(value)
        .map_err(|e| HttpClientError::InvalidHeader(format!("{name}: {e}")))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let options = RequestOptions::default();
        assert!(options.query_string().is_empty());
        assert!(options.header_map().unwrap().is_empty());
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let options = RequestOptions::new().header("X-Todo-ApiKey", "123");
        let map = options.header_map().unwrap();
        assert_eq!(map.get("x-todo-apikey").unwrap(), "123");
    }

    #[test]
    fn test_invalid_header_is_reported() {
        let options = RequestOptions::new().header("bad header", "value");
        let err = options.header_map().unwrap_err();
        assert!(matches!(err, HttpClientError::InvalidHeader(_)));

        let options = RequestOptions::new().header("X-Ok", "line\nbreak");
        assert!(options.header_map().is_err());
    }

    #[test]
    fn test_with_query_appends() {
        let query = QueryString::new().with("param2", "3").with("param2", "4");
        let options = RequestOptions::new().query("param1", "a").with_query(query);
        assert_eq!(
            options.query_string().to_string(),
            "param1=a&param2=3&param2=4"
        );
    }

    #[test]
    fn test_from_query_string() {
        let options: RequestOptions = QueryString::new().with("status", "completed").into();
        assert_eq!(options.query_string().len(), 1);
    }
}
