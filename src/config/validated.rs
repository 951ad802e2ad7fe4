//! Validated SDK configuration.
//!
//! A [`Config`] is an explicit value handed to every client constructor;
//! there is no process-wide default. All validation happens during
//! construction, so a `Config` in hand is always usable.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Which Pingen deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live API
    #[default]
    Production,
    /// Staging API
    Staging,
}

impl FromStr for Environment {
    type Err = ConfigError;

    /// Parses case-insensitively; an empty string means production.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            _ => Err(ConfigError::InvalidEnvironment {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Staging => f.write_str("staging"),
        }
    }
}

/// Credentials, endpoints and transport settings for the SDK.
///
/// Read-only once built; clients hold their own copy.
///
/// # Example
///
/// ```
/// use pingen2_sdk::config::{Config, Environment};
///
/// let config = Config::new("client-id", "client-secret", Environment::Staging).unwrap();
/// assert_eq!(config.api_base_url(), "https://api-staging.pingen.com");
/// ```
#[derive(Clone)]
pub struct Config {
    client_id: String,
    client_secret: String,
    environment: Environment,
    request_timeout: Duration,
    user_agent: String,
    api_base_url_override: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("api_base_url_override", &self.api_base_url_override)
            .finish()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ environment: {}, api: {}, auth: {}, timeout: {}s, client_id: {} }}",
            self.environment,
            self.api_base_url(),
            self.auth_base_url(),
            self.request_timeout.as_secs(),
            self.client_id,
        )
    }
}

impl Config {
    /// Creates a configuration with default endpoints and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if either credential is empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.is_empty() {
            return Err(ConfigError::missing(
                field::CLIENT_ID,
                "Pass a client id or set pingen.client_id in config file",
            ));
        }
        if client_secret.is_empty() {
            return Err(ConfigError::missing(
                field::CLIENT_SECRET,
                "Pass a client secret or set pingen.client_secret in config file",
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
            environment,
            request_timeout: defaults::request_timeout(),
            user_agent: defaults::USER_AGENT.to_string(),
            api_base_url_override: None,
        })
    }

    /// Retargets the API base URL of the active environment.
    ///
    /// Used to point the SDK at a mock server or a proxy.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url_override = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] for a zero timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }
        self.request_timeout = timeout;
        Ok(self)
    }

    /// Replaces the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// API base URL for the active environment, honouring overrides.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url_override {
            return url;
        }
        match self.environment {
            Environment::Production => defaults::API_PRODUCTION_URL,
            Environment::Staging => defaults::API_STAGING_URL,
        }
    }

    /// Identity (OAuth) base URL for the active environment.
    #[must_use]
    pub const fn auth_base_url(&self) -> &'static str {
        match self.environment {
            Environment::Production => defaults::AUTH_PRODUCTION_URL,
            Environment::Staging => defaults::AUTH_STAGING_URL,
        }
    }

    /// The OAuth client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The OAuth client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The selected environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Upper bound for each request round-trip.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// User agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Builds a configuration from a parsed TOML file alone.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or a value is invalid.
    pub fn from_toml(toml: &TomlConfig) -> Result<Self, ConfigError> {
        let section = &toml.pingen;
        let environment: Environment = section
            .environment
            .as_deref()
            .unwrap_or(defaults::ENVIRONMENT)
            .parse()?;

        let config = Self::new(
            section.client_id.clone().unwrap_or_default(),
            section.client_secret.clone().unwrap_or_default(),
            environment,
        )?;

        let config = match section.timeout {
            Some(secs) => config.with_request_timeout(Duration::from_secs(secs))?,
            None => config,
        };

        match section.api_base_url.as_deref() {
            Some(url) => Ok(config.with_api_base_url(validate_url(url)?)),
            None => Ok(config),
        }
    }

    /// Creates a configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A credential is missing
    /// - The environment name is unknown
    /// - The API URL does not parse
    /// - The timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let section = toml.map(|t| &t.pingen);

        let client_id = cli
            .client_id
            .clone()
            .or_else(|| section.and_then(|s| s.client_id.clone()))
            .unwrap_or_default();

        let client_secret = cli
            .client_secret
            .clone()
            .or_else(|| section.and_then(|s| s.client_secret.clone()))
            .unwrap_or_default();

        let environment: Environment = match cli.environment {
            Some(env) => env.into(),
            None => section
                .and_then(|s| s.environment.as_deref())
                .unwrap_or(defaults::ENVIRONMENT)
                .parse()?,
        };

        let timeout_secs = cli
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        let config = Self::new(client_id, client_secret, environment)?
            .with_request_timeout(Duration::from_secs(timeout_secs))?;

        let api_url = cli
            .api_url
            .as_deref()
            .or_else(|| section.and_then(|s| s.api_base_url.as_deref()));

        match api_url {
            Some(url) => Ok(config.with_api_base_url(validate_url(url)?)),
            None => Ok(config),
        }
    }

    /// Loads and merges configuration from CLI and a config file.
    ///
    /// The file is taken from `cli.config`, falling back to the default
    /// location when that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.exists()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_url(url: &str) -> Result<String, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url.trim_end_matches('/').to_string())
}
