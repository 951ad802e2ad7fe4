//! Command execution.
//!
//! Each subcommand maps onto one SDK operation; results are printed to
//! stdout, diagnostics go through `tracing`.

use std::path::Path;

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_stream::StreamExt;

use pingen2_sdk::api::{ApiRequestor, ApiResponse};
use pingen2_sdk::config::{Command, Config, defaults};
use pingen2_sdk::oauth::{TokenResponse, get_token};
use pingen2_sdk::transport::{BodyStream, HttpError, ReqwestClient};
use pingen2_sdk::webhook::verify_signature;
use pingen2_sdk::{PingenError, WebhookSignatureError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] PingenError),

    /// The webhook signature did not verify.
    #[error(transparent)]
    Webhook(#[from] WebhookSignatureError),

    /// A `--query` argument is not `key=value`.
    #[error("Invalid query parameter '{0}': expected key=value")]
    InvalidQuery(String),

    /// The command needs credentials but none were loaded.
    #[error("Command requires a configuration")]
    MissingConfig,

    /// Reading the webhook payload failed.
    #[error("Failed to read payload: {0}")]
    PayloadRead(#[source] std::io::Error),

    /// Writing the download target failed.
    #[error("Failed to write '{path}': {source}")]
    Write {
        /// Destination file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The download stream broke off.
    #[error("Download interrupted: {0}")]
    Download(#[source] HttpError),

    /// A response could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Executes `command`.
///
/// `token` is used as the bearer token when given; otherwise a
/// client-credentials token is requested first.
///
/// # Errors
///
/// Returns the first failure of the underlying SDK call or local I/O.
#[cfg(not(tarpaulin_include))]
pub async fn execute(
    command: Command,
    config: Option<Config>,
    token: Option<String>,
) -> Result<(), RunError> {
    match command {
        Command::Init { .. } => Ok(()),
        Command::VerifyWebhook {
            secret,
            signature,
            payload_file,
        } => {
            let payload = read_payload(payload_file.as_deref()).await?;
            verify_signature(&payload, signature.as_deref(), &secret)?;
            println!("Signature valid");
            Ok(())
        }
        Command::Token { scope } => {
            let config = config.ok_or(RunError::MissingConfig)?;
            let token = request_token(&config, &scope).await?;
            println!("{}", serde_json::to_string_pretty(&token)?);
            Ok(())
        }
        Command::Get { path, query } => {
            let config = config.ok_or(RunError::MissingConfig)?;
            let params = parse_query(&query)?;
            let requestor = authorized_requestor(config, token).await?;
            let pairs: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

            let response = requestor
                .get::<serde_json::Value>(&path, &pairs, None)
                .await?;
            println!("{}", render(&response)?);
            Ok(())
        }
        Command::Download { path, output } => {
            let config = config.ok_or(RunError::MissingConfig)?;
            let requestor = authorized_requestor(config, token).await?;
            let written = download(&requestor, &path, &output).await?;
            tracing::info!(bytes = written, "Saved to {}", output.display());
            Ok(())
        }
    }
}

/// Splits `key=value` arguments into pairs.
///
/// The value may itself contain `=`.
pub fn parse_query(args: &[String]) -> Result<Vec<(String, String)>, RunError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| RunError::InvalidQuery(arg.clone()))
        })
        .collect()
}

/// Formats an API response for stdout.
///
/// Acknowledgements print their status and raw body, content prints as
/// pretty JSON.
pub fn render(response: &ApiResponse<serde_json::Value>) -> Result<String, RunError> {
    match response {
        ApiResponse::Content(value) => Ok(serde_json::to_string_pretty(value)?),
        ApiResponse::Acknowledged(ack) => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "status": ack.status_code,
            "body": ack.body,
        }))?),
    }
}

async fn request_token(config: &Config, scope: &str) -> Result<TokenResponse, PingenError> {
    get_token(
        &ReqwestClient::new(),
        config,
        &[("grant_type", "client_credentials"), ("scope", scope)],
    )
    .await
}

async fn authorized_requestor(
    config: Config,
    token: Option<String>,
) -> Result<ApiRequestor, PingenError> {
    let token = match token {
        Some(token) => token,
        None => {
            tracing::debug!("No --token given, requesting one with client credentials");
            request_token(&config, defaults::TOKEN_SCOPE)
                .await?
                .access_token
        }
    };
    Ok(ApiRequestor::new(token, config))
}

async fn download(requestor: &ApiRequestor, path: &str, output: &Path) -> Result<u64, RunError> {
    let body = requestor.stream(path).await?;
    save_stream(body, output).await
}

/// Writes `body` to `output`, removing the file again if the transfer
/// does not complete.
async fn save_stream(body: BodyStream, output: &Path) -> Result<u64, RunError> {
    let result = write_stream(body, output).await;
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(output).await {
            tracing::debug!(error = %e, "Could not remove partial download {}", output.display());
        }
    }
    result
}

async fn write_stream(mut body: BodyStream, output: &Path) -> Result<u64, RunError> {
    let write_failed = |source| RunError::Write {
        path: output.display().to_string(),
        source,
    };

    let mut file = tokio::fs::File::create(output)
        .await
        .map_err(write_failed)?;

    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(RunError::Download)?;
        file.write_all(&chunk).await.map_err(write_failed)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_failed)?;

    Ok(written)
}

async fn read_payload(path: Option<&Path>) -> Result<String, RunError> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(RunError::PayloadRead),
        None => {
            let mut payload = String::new();
            tokio::io::stdin()
                .read_to_string(&mut payload)
                .await
                .map_err(RunError::PayloadRead)?;
            Ok(payload)
        }
    }
}
