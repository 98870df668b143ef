//! Vault Reconciler Library
//!
//! Declarative reconciliation client for HashiCorp Vault. Given a description of
//! a secret backend, auth method, policy, token or secret, it converges the
//! remote state toward it with as few writes as possible.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vault_reconciler::prelude::*;
//!
//! # async fn example() -> vault_reconciler::Result<()> {
//! vault_reconciler::install_crypto_provider();
//! let client = VaultClient::connect(&Config::from_env()).await?;
//!
//! let mut pki = Backend::new("pki", "pki", "internal ca");
//! pki.attrs.push(
//!     Attributes::new()
//!         .with("uri", "root/generate/internal")
//!         .with("oneshot", true)
//!         .with("common_name", "example.com"),
//! );
//! let created = client.mount_backend(&pki).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod attributes;
pub mod client;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod observability;
pub mod policy;
pub mod prelude;
pub mod probe;
pub mod reconciler;
pub mod secrets;
pub mod signer;
pub mod state;
pub mod token;
pub mod types;
pub mod validation;

pub use client::VaultClient;
pub use error::{Result, ValidationError, VaultError};

/// Install ring as the process-wide rustls crypto provider
///
/// Safe to call more than once; only the first call has an effect.
pub fn install_crypto_provider() {
    // Err means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}
