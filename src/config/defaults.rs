//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Environment used when none is given.
pub const ENVIRONMENT: &str = "production";

/// Default per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Production API base URL.
pub const API_PRODUCTION_URL: &str = "https://api.pingen.com";

/// Production identity (OAuth) base URL.
pub const AUTH_PRODUCTION_URL: &str = "https://identity.pingen.com";

/// Staging API base URL.
pub const API_STAGING_URL: &str = "https://api-staging.pingen.com";

/// Staging identity (OAuth) base URL.
pub const AUTH_STAGING_URL: &str = "https://identity-staging.pingen.com";

/// User agent sent with every request.
pub const USER_AGENT: &str = "PINGEN.SDK.RUST";

/// Scopes requested for client-credentials tokens by the CLI.
pub const TOKEN_SCOPE: &str = "letter batch webhook organisation_read user email ebill";

/// File name of the configuration file inside the user config directory.
pub const CONFIG_FILE_NAME: &str = "pingen2.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

/// Default configuration file location (`<config dir>/pingen2.toml`).
///
/// Returns `None` when the platform has no user configuration directory.
#[must_use]
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
