//! # Validation
//!
//! Pure structural checks run on desired-state descriptions before any
//! network call. Every function is total: the same input always yields the
//! same verdict.

mod authority;
mod auth;
mod backend;
mod secrets;
mod token;

pub use auth::validate_auth;
pub use authority::validate_certificate_authority;
pub use backend::validate_backend;
pub use secrets::validate_secret;
pub use token::validate_token;

/// Membership test against one of the fixed supported-type sets
pub(crate) fn is_supported(value: &str, supported: &[&str]) -> bool {
    supported.contains(&value)
}
