//! Request URL composition.

use crate::QueryString;

/// Combine a base address, a path and an optional query string into one URL.
///
/// With a base, trailing slashes on the base and leading slashes on the path
/// are trimmed and exactly one `/` joins them. Without a base the path is
/// used as given. The `?` separator is only written when the query string
/// has at least one parameter.
///
/// ```
/// use http_extensions::{build_url, QueryString};
///
/// let query = QueryString::new().with("status", "completed");
/// assert_eq!(
///     build_url(Some("http://example.com/"), "/todos", Some(&query)),
///     "http://example.com/todos?status=completed"
/// );
/// ```
pub fn build_url(base: Option<&str>, path: &str, query: Option<&QueryString>) -> String {
    let mut url = String::new();

    match base {
        Some(base) => {
            url.push_str(base.trim_end_matches('/'));
            url.push('/');
            url.push_str(path.trim_start_matches('/'));
        }
        None => url.push_str(path),
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query.to_string());
    }

    url
}
