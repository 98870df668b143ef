//! # Client Configuration
//!
//! Connection settings for the Vault client, loaded from environment variables.

use crate::constants::{DEFAULT_AUTH_PATH, DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_VAULT_ADDR};
use crate::duration::parse_duration;
use crate::types::Credentials;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Library configuration, built by the caller and handed over fully formed
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the Vault service, e.g. `https://vault.example.com:8200`
    pub vault_hostname: String,
    /// Credentials used to obtain the session token
    pub credentials: Credentials,
    /// Skip TLS certificate verification
    pub skip_tls_verify: bool,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Enable verbose logging in the CLI
    pub verbose: bool,
    /// Remote signer used for certificate requests
    pub certificate_authority: Option<CertificateAuthority>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_hostname: DEFAULT_VAULT_ADDR.to_string(),
            credentials: Credentials::default(),
            skip_tls_verify: false,
            timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            verbose: false,
            certificate_authority: None,
        }
    }
}

/// A CFSSL signer
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateAuthority {
    /// Profile used by a multiroot CA
    #[serde(default)]
    pub profile: String,
    /// Hex-encoded authentication key
    pub token: String,
    /// Base URL of the signing service
    pub url: String,
}

impl std::fmt::Debug for CertificateAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificateAuthority")
            .field("profile", &self.profile)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// - `VAULT_ADDR`, `VAULT_SKIP_VERIFY`, `VAULT_CLIENT_TIMEOUT`, `VAULT_VERBOSE`
    /// - `VAULT_TOKEN`, or `VAULT_USERNAME` / `VAULT_PASSWORD` / `VAULT_AUTH_PATH`
    /// - `CFSSL_URL`, `CFSSL_TOKEN`, `CFSSL_PROFILE`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let credentials = match (
            lookup("VAULT_TOKEN").filter(|v| !v.is_empty()),
            lookup("VAULT_USERNAME"),
            lookup("VAULT_PASSWORD"),
        ) {
            (Some(token), _, _) => Credentials::token(token),
            (None, Some(username), Some(password)) => Credentials::userpass(
                lookup("VAULT_AUTH_PATH").unwrap_or_else(|| DEFAULT_AUTH_PATH.to_string()),
                username,
                password,
            ),
            _ => Credentials::default(),
        };

        let timeout = match lookup("VAULT_CLIENT_TIMEOUT") {
            Some(raw) => match parse_duration(&raw)
                .ok()
                .and_then(|d| d.to_std().ok())
                .filter(|d| !d.is_zero())
            {
                Some(timeout) => timeout,
                None => {
                    warn!(
                        "Invalid VAULT_CLIENT_TIMEOUT '{}', using default of {}s",
                        raw, DEFAULT_CLIENT_TIMEOUT_SECS
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        let certificate_authority = match (lookup("CFSSL_URL"), lookup("CFSSL_TOKEN")) {
            (Some(url), Some(token)) => Some(CertificateAuthority {
                profile: lookup("CFSSL_PROFILE").unwrap_or_default(),
                token,
                url,
            }),
            _ => None,
        };

        Self {
            vault_hostname: lookup("VAULT_ADDR").unwrap_or(defaults.vault_hostname),
            credentials,
            skip_tls_verify: lookup("VAULT_SKIP_VERIFY").map_or(defaults.skip_tls_verify, |v| parse_bool(&v)),
            timeout,
            verbose: lookup("VAULT_VERBOSE").map_or(defaults.verbose, |v| parse_bool(&v)),
            certificate_authority,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    let v_lower = value.to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}
