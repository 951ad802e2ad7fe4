//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::defaults;

/// pingen2: command-line client for the Pingen API
///
/// Obtains access tokens, fetches resources, downloads files and
/// verifies inbound webhook signatures.
#[derive(Debug, Parser)]
#[command(name = "pingen2")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// OAuth client id
    #[arg(long = "client-id", global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long = "client-secret", global = true)]
    pub client_secret: Option<String>,

    /// Target environment
    #[arg(long, value_enum, global = true)]
    pub environment: Option<EnvironmentArg>,

    /// Replacement API base URL
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Access token; a client-credentials token is requested when omitted
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for pingen2
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "pingen2.toml")]
        output: PathBuf,
    },

    /// Request an access token with the client-credentials grant
    Token {
        /// Space separated scopes
        #[arg(long, default_value = defaults::TOKEN_SCOPE)]
        scope: String,
    },

    /// GET an API path and print the JSON response
    Get {
        /// Path relative to the API base URL, e.g. /organisations
        path: String,

        /// Query parameters in 'key=value' format (can be specified multiple times)
        #[arg(long = "query", short = 'q', value_name = "K=V")]
        query: Vec<String>,
    },

    /// Stream an API path into a file
    Download {
        /// Path relative to the API base URL
        path: String,

        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Verify an inbound webhook payload against its signature
    VerifyWebhook {
        /// Shared webhook secret
        #[arg(long)]
        secret: String,

        /// Value of the `Signature` header
        #[arg(long)]
        signature: Option<String>,

        /// File containing the raw payload (stdin when omitted)
        #[arg(long = "payload-file")]
        payload_file: Option<PathBuf>,
    },
}

/// Environment argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    /// Live API
    #[value(name = "production")]
    Production,
    /// Staging API
    #[value(name = "staging")]
    Staging,
}

impl From<EnvironmentArg> for super::Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Production => Self::Production,
            EnvironmentArg::Staging => Self::Staging,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if the command talks to the API and needs credentials.
    #[must_use]
    pub const fn needs_config(&self) -> bool {
        !matches!(
            self.command,
            Command::Init { .. } | Command::VerifyWebhook { .. }
        )
    }
}
