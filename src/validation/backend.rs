//! # Backend Validation

use super::is_supported;
use crate::constants::SUPPORTED_BACKEND_TYPES;
use crate::error::{Result, ValidationError, VaultError};
use crate::types::Backend;
use chrono::TimeDelta;

/// Validate a secret backend description
///
/// Checks run in order and the first failure is returned: path, type,
/// description, lease ordering, lease signs, supported type, attribute uris.
pub fn validate_backend(backend: &Backend) -> Result<()> {
    let path = &backend.path;
    if path.is_empty() {
        return Err(ValidationError::MissingPath { kind: "backend" }.into());
    }
    if backend.backend_type.is_empty() {
        return Err(ValidationError::MissingType {
            kind: "backend",
            path: path.clone(),
        }
        .into());
    }
    if backend.description.is_empty() {
        return Err(ValidationError::MissingDescription { path: path.clone() }.into());
    }
    if backend.max_lease_ttl < backend.default_lease_ttl {
        return Err(ValidationError::MaxLeaseBelowDefault { path: path.clone() }.into());
    }
    if backend.default_lease_ttl < TimeDelta::zero() {
        return Err(ValidationError::NegativeDefaultLease { path: path.clone() }.into());
    }
    if backend.max_lease_ttl < TimeDelta::zero() {
        return Err(ValidationError::NegativeMaxLease { path: path.clone() }.into());
    }
    if !is_supported(&backend.backend_type, SUPPORTED_BACKEND_TYPES) {
        return Err(VaultError::UnsupportedType {
            kind: "backend",
            name: backend.backend_type.clone(),
        });
    }
    if let Some(index) = backend.attrs.iter().position(|a| a.uri().is_empty()) {
        return Err(ValidationError::AttributeMissingUri {
            kind: "backend",
            path: path.clone(),
            index,
        }
        .into());
    }

    Ok(())
}
