//! Signature computation and comparison.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;

use crate::error::{WebhookSignatureError, header_value};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded payload signature.
pub const SIGNATURE_HEADER: &str = "Signature";

const SIGNATURE_MISSING: &str = "signature missing";
const SIGNATURE_MISMATCH: &str = "webhook signature matching failed";

/// A webhook delivery whose signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    /// Raw payload exactly as received
    pub payload: String,
}

impl WebhookEvent {
    /// Returns the raw payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Consumes the event, returning the raw payload.
    #[must_use]
    pub fn into_payload(self) -> String {
        self.payload
    }

    /// Decodes the payload as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if the payload does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }
}

fn keyed(secret: &str) -> Result<HmacSha256, WebhookSignatureError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| WebhookSignatureError::new(format!("invalid webhook secret: {e}")))
}

/// Computes the lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
///
/// # Errors
///
/// Returns an error if the secret cannot be used as an HMAC key.
pub fn compute_signature(payload: &str, secret: &str) -> Result<String, WebhookSignatureError> {
    let mut mac = keyed(secret)?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks `signature` against the HMAC of `payload`.
///
/// Only a 64 character lowercase hex string can match. The digest
/// comparison runs in constant time.
///
/// # Errors
///
/// - `"signature missing"` if `signature` is `None`
/// - `"webhook signature matching failed"` on any mismatch
pub fn verify_signature(
    payload: &str,
    signature: Option<&str>,
    secret: &str,
) -> Result<(), WebhookSignatureError> {
    let Some(signature) = signature else {
        tracing::warn!("Webhook rejected: signature missing");
        return Err(WebhookSignatureError::new(SIGNATURE_MISSING));
    };

    let mismatch = || {
        tracing::warn!("Webhook rejected: signature mismatch");
        WebhookSignatureError::new(SIGNATURE_MISMATCH)
    };

    let well_formed = signature.len() == 64
        && signature
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        return Err(mismatch());
    }

    let expected = hex::decode(signature).map_err(|_| mismatch())?;

    let mut mac = keyed(secret)?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&expected).map_err(|_| mismatch())
}

/// Looks up the `Signature` header and verifies it.
///
/// An exact `Signature` key is preferred; other spellings are matched
/// case-insensitively.
///
/// # Errors
///
/// See [`verify_signature`].
pub fn verify_header<S: std::hash::BuildHasher>(
    payload: &str,
    headers: &HashMap<String, String, S>,
    secret: &str,
) -> Result<(), WebhookSignatureError> {
    verify_signature(payload, header_value(headers, SIGNATURE_HEADER), secret)
}

/// Verifies a delivery and wraps its payload.
///
/// # Errors
///
/// See [`verify_signature`].
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use pingen2_sdk::webhook::{compute_signature, construct_event};
///
/// let payload = r#"{"data":{"type":"webhook_issues"}}"#;
/// let signature = compute_signature(payload, "secret").unwrap();
/// let headers = HashMap::from([("Signature".to_string(), signature)]);
///
/// let event = construct_event(payload, &headers, "secret").unwrap();
/// assert_eq!(event.payload(), payload);
/// ```
pub fn construct_event<S: std::hash::BuildHasher>(
    payload: &str,
    headers: &HashMap<String, String, S>,
    secret: &str,
) -> Result<WebhookEvent, WebhookSignatureError> {
    verify_header(payload, headers, secret)?;
    tracing::debug!(bytes = payload.len(), "Webhook signature verified");

    Ok(WebhookEvent {
        payload: payload.to_string(),
    })
}
