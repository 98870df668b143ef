//! # Vault Client
//!
//! `VaultClient` is the entry point for every operation. It owns the transport
//! (`VaultApi`) and an optional certificate signer, and holds no remote state:
//! each call re-reads what it needs.
//!
//! Operations are implemented next to the concern they belong to:
//! - `probe`: existence checks and listings
//! - `reconciler`: backends and auth methods
//! - `policy`: policy store
//! - `token`: token issuance and lookup
//! - `secrets`: generic secrets
//! - `signer`: certificate signing

use crate::api::session::authorize;
use crate::api::{VaultApi, VaultRest};
use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::signer::{CertificateSigner, CfsslSigner};
use crate::validation::validate_certificate_authority;
use tracing::info;

/// Reconciliation client over a `VaultApi` transport
pub struct VaultClient<A = VaultRest> {
    api: A,
    signer: Option<Box<dyn CertificateSigner>>,
}

impl<A: std::fmt::Debug> std::fmt::Debug for VaultClient<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("api", &self.api)
            .field("signer", &self.signer.is_some())
            .finish()
    }
}

impl<A: VaultApi> VaultClient<A> {
    /// Wrap an already authenticated transport
    pub fn new(api: A) -> Self {
        Self { api, signer: None }
    }

    /// Attach a certificate signer
    #[must_use]
    pub fn with_signer(mut self, signer: impl CertificateSigner + 'static) -> Self {
        self.signer = Some(Box::new(signer));
        self
    }

    /// The underlying transport
    pub fn api(&self) -> &A {
        &self.api
    }

    pub(crate) fn signer(&self) -> Result<&dyn CertificateSigner> {
        self.signer
            .as_deref()
            .ok_or(VaultError::NoCertificateAuthority)
    }
}

impl VaultClient<VaultRest> {
    /// Build the HTTP transport, log in and attach the configured signer
    ///
    /// # Errors
    /// Invalid certificate authority settings, client construction or login failures
    pub async fn connect(config: &Config) -> Result<Self> {
        info!("Connecting to Vault at {}", config.vault_hostname);
        if let Some(authority) = &config.certificate_authority {
            validate_certificate_authority(authority)?;
        }

        let rest = VaultRest::new(
            &config.vault_hostname,
            config.timeout,
            config.skip_tls_verify,
        )?;

        let token = authorize(&rest, &config.credentials).await?;
        let mut client = Self::new(rest.with_token(token));

        if let Some(authority) = &config.certificate_authority {
            client = client.with_signer(CfsslSigner::new(authority, config.timeout)?);
        }

        Ok(client)
    }
}
