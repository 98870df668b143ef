//! # Secret Validation

use crate::error::{Result, ValidationError};
use crate::types::Secret;

/// A generic secret must name the path it is written to
pub fn validate_secret(secret: &Secret) -> Result<()> {
    if secret.path.trim_matches('/').is_empty() {
        return Err(ValidationError::MissingSecretPath.into());
    }
    Ok(())
}
