//! Query-string helpers
//!
//! Paging on the GtR API is driven entirely by the `page` and `fetchSize`
//! query parameters, so the client needs to read and rewrite them without
//! disturbing anything else in the URL.

use crate::error::Result;
use url::Url;

/// Set `name` to `value` on `url`, replacing any existing values of `name`.
///
/// The parameter is moved to the end of the query string; every other
/// component (scheme, host, path, other parameters, fragment) is preserved.
pub fn set_query_param(url: &str, name: &str, value: &str) -> Result<String> {
    let mut parsed = Url::parse(url)?;
    let retained: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(name, value);

    Ok(parsed.to_string())
}

/// First value of `name` in the query string of `url`, if any
pub fn get_query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
