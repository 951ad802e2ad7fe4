//! Pingen2 SDK: client core for the Pingen postal API
//!
//! Builds and sends authenticated JSON:API requests, interprets the
//! responses into typed results or a uniform [`PingenError`], and verifies
//! the signature of inbound webhook deliveries.
//!
//! ```no_run
//! use pingen2_sdk::api::ApiRequestor;
//! use pingen2_sdk::config::{Config, Environment};
//! use pingen2_sdk::oauth;
//! use pingen2_sdk::transport::ReqwestClient;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new("client-id", "client-secret", Environment::Staging)?;
//! let token = oauth::get_token(
//!     &ReqwestClient::new(),
//!     &config,
//!     &[("grant_type", "client_credentials"), ("scope", "letter")],
//! )
//! .await?;
//!
//! let requestor = ApiRequestor::new(token.access_token, config);
//! let organisations = requestor
//!     .get::<serde_json::Value>("/organisations", &[], None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod oauth;
pub mod transport;
pub mod webhook;

pub use error::{ErrorKind, PingenError, WebhookSignatureError};
