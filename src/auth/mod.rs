//! Authentication module
//!
//! The GtR API is public, but mirrors and staging deployments sit behind
//! HTTP Basic credentials. The `Authenticator` attaches them to each request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
