//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Account and endpoint section
    #[serde(default)]
    pub pingen: PingenSection,
}

/// Account and endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PingenSection {
    /// OAuth client id
    pub client_id: Option<String>,

    /// OAuth client secret
    pub client_secret: Option<String>,

    /// "production" or "staging"
    pub environment: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Replacement API base URL for the active environment
    pub api_base_url: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Pingen SDK Configuration File

[pingen]
# OAuth client credentials (required)
# client_id = "your-client-id"
# client_secret = "your-client-secret"

# Target environment: "production" (default) or "staging"
environment = "production"

# Request timeout in seconds (default: 20)
timeout = 20

# Replacement API base URL, e.g. for a local mock server
# api_base_url = "http://localhost:8080"
"#
    .to_string()
}
