//! # Certificate Signing
//!
//! Forwards certificate signing requests to an external CFSSL signer.
//!
//! CFSSL's `authsign` endpoint expects each request to be authenticated with
//! an HMAC-SHA256 of the request body, keyed with the shared key configured on
//! the signer. Both the body and the HMAC travel base64 encoded:
//!
//! ```json
//! {"token": "<b64 hmac>", "request": "<b64 body>"}
//! ```

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::config::CertificateAuthority;
use crate::constants::CFSSL_AUTHSIGN_PATH;
use crate::error::{Result, VaultError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};

type HmacSha256 = Hmac<Sha256>;

/// Something that turns a signing request into a PEM certificate
#[async_trait]
pub trait CertificateSigner: Send + Sync {
    /// Sign the JSON encoded `request` and return the certificate
    async fn sign(&self, request: &[u8]) -> Result<String>;

    /// Profile used when the caller does not name one
    fn default_profile(&self) -> &str {
        ""
    }
}

/// Body handed to the signer
#[derive(Debug, Default, Serialize)]
pub(crate) struct SigningRequest<'a> {
    pub hosts: Vec<String>,
    pub certificate_request: &'a str,
    pub profile: &'a str,
    pub crl_override: &'a str,
    pub label: &'a str,
}

#[derive(Serialize)]
struct AuthenticatedRequest {
    token: String,
    request: String,
}

#[derive(Debug, Deserialize)]
struct CfsslResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<SignResult>,
    #[serde(default)]
    errors: Vec<CfsslMessage>,
}

#[derive(Debug, Deserialize)]
struct SignResult {
    certificate: String,
}

#[derive(Debug, Deserialize)]
struct CfsslMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// HTTP client for a CFSSL `authsign` endpoint
pub struct CfsslSigner {
    http_client: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
    profile: String,
}

impl std::fmt::Debug for CfsslSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfsslSigner")
            .field("endpoint", &self.endpoint)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl CfsslSigner {
    /// Build a signer for `authority`
    ///
    /// # Errors
    /// A token that is not valid hex, or HTTP client construction failures
    pub fn new(authority: &CertificateAuthority, timeout: Duration) -> Result<Self> {
        let key = hex::decode(authority.token.trim()).map_err(|e| {
            VaultError::Config(format!("certificate authority token is not hex: {e}"))
        })?;

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: format!(
                "{}/{}",
                authority.url.trim_end_matches('/'),
                CFSSL_AUTHSIGN_PATH
            ),
            key,
            profile: authority.profile.clone(),
        })
    }

    /// Wrap `request` with its HMAC
    fn authenticate(&self, request: &[u8]) -> Result<AuthenticatedRequest> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| VaultError::Signer(format!("invalid signing key: {e}")))?;
        mac.update(request);

        Ok(AuthenticatedRequest {
            token: BASE64.encode(mac.finalize().into_bytes()),
            request: BASE64.encode(request),
        })
    }
}

#[async_trait]
impl CertificateSigner for CfsslSigner {
    async fn sign(&self, request: &[u8]) -> Result<String> {
        let body = self.authenticate(request)?;
        debug!("Sending signing request to {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed: CfsslResponse = serde_json::from_str(&text).map_err(|_| {
            VaultError::Signer(format!("unexpected response (status: {status}): {text}"))
        })?;

        if !parsed.success || !status.is_success() {
            let reasons: Vec<String> = parsed
                .errors
                .iter()
                .map(|e| format!("{} ({})", e.message, e.code))
                .collect();
            return Err(VaultError::Signer(if reasons.is_empty() {
                format!("signing failed (status: {status})")
            } else {
                reasons.join("; ")
            }));
        }

        parsed
            .result
            .map(|r| r.certificate)
            .ok_or_else(|| VaultError::Signer("response has no certificate".to_string()))
    }

    fn default_profile(&self) -> &str {
        &self.profile
    }
}

impl<A: VaultApi> VaultClient<A> {
    /// Have the configured certificate authority sign `csr`
    ///
    /// An empty `profile` falls back to the profile configured on the signer.
    ///
    /// # Errors
    /// `NoCertificateAuthority` when no signer is attached, or the signing failure
    pub async fn sign_certificate(&self, csr: &str, profile: &str) -> Result<String> {
        let signer = self.signer()?;
        let profile = if profile.is_empty() {
            signer.default_profile()
        } else {
            profile
        };

        let request = serde_json::to_vec(&SigningRequest {
            certificate_request: csr,
            profile,
            ..SigningRequest::default()
        })?;

        let certificate = signer.sign(&request).await?;
        info!("Certificate signed with profile '{}'", profile);
        Ok(certificate)
    }
}
