//! Transport layer: the wire-level HTTP exchange.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`], [`RequestBody`])
//! - Handling HTTP responses with lazily read bodies ([`HttpResponse`], [`BodyStream`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod body;
mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;

pub use body::{BodyStream, RequestBody};
pub use client::ReqwestClient;
pub use error::HttpError;
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
