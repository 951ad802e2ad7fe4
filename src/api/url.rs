//! Absolute request URL construction.

use url::Url;

/// Joins `base` and `path` and encodes `params` into the query string.
///
/// The query is rebuilt from any parameters already present in `path`
/// plus `params`, ordered by key (stable for repeated keys) and
/// form-urlencoded. Without parameters no `?` is emitted.
///
/// An empty `path` yields the root path: `http://host` becomes
/// `http://host/`, since [`Url`] always carries a path for `http(s)`.
///
/// # Errors
///
/// Returns the parse error if `base` + `path` is not an absolute URL.
///
/// # Example
///
/// ```
/// use pingen2_sdk::api::build_url;
///
/// let url = build_url(
///     "https://api.pingen.com",
///     "/documents",
///     &[("key", "value"), ("anotherKey", "anotherValue")],
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://api.pingen.com/documents?anotherKey=anotherValue&key=value"
/// );
/// ```
pub fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{base}{path}"))?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.extend(params.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}
