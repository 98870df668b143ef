//! # Certificate Authority Validation

use crate::config::CertificateAuthority;
use crate::error::{Result, ValidationError};
use reqwest::Url;

/// A signer needs a token and a well-formed URL
pub fn validate_certificate_authority(authority: &CertificateAuthority) -> Result<()> {
    if authority.token.is_empty() {
        return Err(ValidationError::MissingAuthorityToken.into());
    }
    if authority.url.is_empty() {
        return Err(ValidationError::MissingAuthorityUrl.into());
    }
    Url::parse(&authority.url).map_err(|e| ValidationError::InvalidAuthorityUrl {
        url: authority.url.clone(),
        reason: e.to_string(),
    })?;
    Ok(())
}
