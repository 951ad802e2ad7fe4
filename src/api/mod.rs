//! Pingen API access: URL building, headers, execution and response
//! interpretation.
//!
//! [`ApiRequestor`] ties the pieces together; the building blocks are
//! exported for callers that drive their own [`HttpClient`](crate::transport::HttpClient).

mod headers;
mod requestor;
mod response;
mod url;

#[cfg(test)]
mod headers_tests;

pub use headers::{JSON_API_MEDIA_TYPE, compose_headers};
pub use requestor::ApiRequestor;
pub use response::{ApiResponse, DefaultResponse, Links, ListResponse, Meta, interpret_response};
pub use self::url::build_url;
