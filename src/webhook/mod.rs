//! Inbound webhook verification.
//!
//! Pingen signs every webhook delivery with HMAC-SHA256 over the raw body,
//! keyed with the shared webhook secret, and sends the lowercase hex digest
//! in the `Signature` header. [`construct_event`] checks that signature and
//! hands back the untouched payload.

mod signature;

#[cfg(test)]
mod signature_tests;

pub use signature::{
    SIGNATURE_HEADER, WebhookEvent, compute_signature, construct_event, verify_header,
    verify_signature,
};
