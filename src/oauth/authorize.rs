//! Browser-side grant helpers.

use std::collections::BTreeMap;

use thiserror::Error;
use url::Url;

use crate::config::Config;

/// Builds the authorization URL for the active environment.
///
/// Caller parameters are kept, `client_id` is always taken from `config`,
/// and `response_type` defaults to `code` when absent or empty. A key given
/// twice keeps its last value. Keys are emitted in sorted order.
///
/// # Errors
///
/// Returns the parse error if the identity base URL is malformed.
///
/// # Example
///
/// ```
/// use pingen2_sdk::config::{Config, Environment};
/// use pingen2_sdk::oauth::authorize_url;
///
/// let config = Config::new("my-client", "secret", Environment::Production).unwrap();
/// let url = authorize_url(&config, &[("scope", "letter"), ("state", "xyz")]).unwrap();
///
/// assert_eq!(url.host_str(), Some("identity.pingen.com"));
/// assert_eq!(
///     url.query(),
///     Some("client_id=my-client&response_type=code&scope=letter&state=xyz")
/// );
/// ```
pub fn authorize_url(config: &Config, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut values: BTreeMap<&str, &str> = params.iter().copied().collect();

    values.insert("client_id", config.client_id());
    let response_type = values.entry("response_type").or_default();
    if response_type.is_empty() {
        *response_type = "code";
    }

    let mut url = Url::parse(config.auth_base_url())?;
    url.query_pairs_mut().extend_pairs(values);
    Ok(url)
}

/// Token carried in an implicit-grant redirect fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImplicitToken {
    /// The bearer token; empty if the fragment had none
    pub access_token: String,
    /// Lifetime in seconds as sent; empty if the fragment had none
    pub expires_in: String,
}

/// A redirect fragment that is not a `key=value&...` list.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid fragment format: {fragment}")]
pub struct FragmentError {
    /// The offending fragment
    pub fragment: String,
}

/// Extracts the token from an implicit-grant fragment.
///
/// Values are taken verbatim (no percent-decoding). A leading `#` is
/// tolerated.
///
/// # Errors
///
/// Returns [`FragmentError`] if any `&`-separated pair lacks `=`.
pub fn token_from_implicit(fragment: &str) -> Result<ImplicitToken, FragmentError> {
    let mut token = ImplicitToken::default();

    for pair in fragment.trim_start_matches('#').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(FragmentError {
                fragment: fragment.to_string(),
            });
        };
        match key {
            "access_token" => token.access_token = value.to_string(),
            "expires_in" => token.expires_in = value.to_string(),
            _ => {}
        }
    }

    Ok(token)
}
