//! # Errors
//!
//! Error taxonomy shared by every operation of the client.
//!
//! Validation failures are raised before any network call. Everything else is
//! returned as soon as it happens; nothing is retried and nothing already
//! written is rolled back.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = VaultError> = std::result::Result<T, E>;

/// Errors returned by the reconciliation client
#[derive(Debug, Error)]
pub enum VaultError {
    /// The desired-state description is malformed
    #[error("invalid resource definition: {0}")]
    Validation(#[from] ValidationError),

    /// The backend or auth type is outside the supported set
    #[error("{kind} type '{name}' is not supported")]
    UnsupportedType { kind: &'static str, name: String },

    /// A delete or lookup targeted a resource that does not exist
    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: &'static str, name: String },

    /// The remote service answered outside the 2xx/3xx range
    #[error("invalid response from vault (status: {status}): {message}")]
    Http { status: u16, message: String },

    /// The request could not be sent or the response body could not be read
    #[error("request to vault failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A payload could not be encoded or decoded as JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field of a loosely typed response has an unexpected shape
    #[error("failed to decode field '{field}': {reason}")]
    Decode { field: &'static str, reason: String },

    /// Neither a token nor username/password credentials were supplied
    #[error("no authentication specified")]
    NoAuthentication,

    /// Signing was requested but no certificate authority is configured
    #[error("no certificate authority configured")]
    NoCertificateAuthority,

    /// The certificate authority rejected or failed the signing request
    #[error("certificate authority error: {0}")]
    Signer(String),

    /// Client configuration could not be turned into a working client
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl VaultError {
    /// Shorthand for a `NotFound` error
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// True when the error is a `NotFound`
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True when the error was raised locally, before any remote call
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedType { .. })
    }
}

/// Structural problems found in a desired-state description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} must have a path")]
    MissingPath { kind: &'static str },

    #[error("{kind} {path} must have a type")]
    MissingType { kind: &'static str, path: String },

    #[error("backend {path} must have a description")]
    MissingDescription { path: String },

    #[error("backend: {path}, max lease ttl cannot be less than the default")]
    MaxLeaseBelowDefault { path: String },

    #[error("backend: {path}, default lease time must be positive")]
    NegativeDefaultLease { path: String },

    #[error("backend: {path}, max lease time must be positive")]
    NegativeMaxLease { path: String },

    #[error("auth path {path} should not end with /")]
    TrailingSlash { path: String },

    #[error("attributes must have a uri specified")]
    MissingUri,

    #[error("{kind}: {path}, attribute {index} must have a uri")]
    AttributeMissingUri {
        kind: &'static str,
        path: String,
        index: usize,
    },

    #[error("attribute {index} invalid, error: {source}")]
    InvalidAttribute {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("token must have a display name")]
    MissingDisplayName,

    #[error("secret must have a path")]
    MissingSecretPath,

    #[error("certificate authority must have a token")]
    MissingAuthorityToken,

    #[error("certificate authority must have a url")]
    MissingAuthorityUrl,

    #[error("certificate authority url '{url}' is invalid: {reason}")]
    InvalidAuthorityUrl { url: String, reason: String },

    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
}
