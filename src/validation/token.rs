//! # Token Validation

use crate::error::{Result, ValidationError};
use crate::types::UserToken;

/// A token needs a display name and the path of its token backend
pub fn validate_token(token: &UserToken) -> Result<()> {
    if token.display_name.is_empty() {
        return Err(ValidationError::MissingDisplayName.into());
    }
    if token.path.is_empty() {
        return Err(ValidationError::MissingPath { kind: "token" }.into());
    }
    Ok(())
}
