//! Configuration layer for the Pingen SDK.
//!
//! This module provides:
//! - The validated SDK configuration ([`Config`], [`Environment`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - CLI argument parsing for the `pingen2` binary ([`Cli`], [`Command`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! When the binary assembles a [`Config`], values are resolved with the
//! following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** - `--config`, else `<config dir>/pingen2.toml` if present
//! 3. **Built-in defaults**
//!
//! Library users normally skip all of this and call [`Config::new`].

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command, EnvironmentArg};
pub use error::{ConfigError, field};
pub use toml::{PingenSection, TomlConfig, default_config_template};
pub use validated::{Config, Environment, write_default_config};
