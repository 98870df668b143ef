//! # Auth Method Validation

use super::is_supported;
use crate::constants::SUPPORTED_AUTH_TYPES;
use crate::error::{Result, ValidationError, VaultError};
use crate::types::Auth;

/// Validate an auth method description
///
/// The description is not required. Nested attribute failures are wrapped with
/// the index of the offending attribute.
pub fn validate_auth(auth: &Auth) -> Result<()> {
    if auth.auth_type.is_empty() {
        return Err(ValidationError::MissingType {
            kind: "auth",
            path: auth.path.clone(),
        }
        .into());
    }
    if auth.path.is_empty() {
        return Err(ValidationError::MissingPath { kind: "auth" }.into());
    }
    if auth.path.ends_with('/') {
        return Err(ValidationError::TrailingSlash {
            path: auth.path.clone(),
        }
        .into());
    }
    if !is_supported(&auth.auth_type, SUPPORTED_AUTH_TYPES) {
        return Err(VaultError::UnsupportedType {
            kind: "auth",
            name: auth.auth_type.clone(),
        });
    }
    for (index, attrs) in auth.attrs.iter().enumerate() {
        attrs
            .validate()
            .map_err(|source| ValidationError::InvalidAttribute {
                index,
                source: Box::new(source),
            })?;
    }

    Ok(())
}
