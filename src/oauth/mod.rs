//! OAuth2 helpers for the Pingen identity service.
//!
//! - [`authorize_url`]: where to send a user for the authorization-code or
//!   implicit grant
//! - [`get_token`]: exchange client credentials (or a code) for a token
//! - [`token_from_implicit`]: read the token out of an implicit-grant
//!   redirect fragment

mod authorize;
mod token;


pub use authorize::{FragmentError, ImplicitToken, authorize_url, token_from_implicit};
pub use token::{ACCESS_TOKEN_PATH, TokenResponse, get_token};
