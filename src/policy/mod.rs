//! # Policy Store
//!
//! Named access policies. Rules are stored remotely as the JSON document
//! produced by `codec::encode`.

pub mod codec;

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::error::{Result, ValidationError, VaultError};
use crate::observability::metrics;
use crate::probe::ResourceKind;
use crate::types::Policy;
use tracing::{debug, info};

impl<A: VaultApi> VaultClient<A> {
    /// True when a policy called `name` exists
    ///
    /// # Errors
    /// Listing failures
    pub async fn has_policy(&self, name: &str) -> Result<bool> {
        self.exists(ResourceKind::Policy, name).await
    }

    /// Names of every policy
    ///
    /// # Errors
    /// Listing failures
    pub async fn list_policies(&self) -> Result<Vec<String>> {
        self.list(ResourceKind::Policy).await
    }

    /// Read and decode the policy called `name`
    ///
    /// # Errors
    /// `NotFound` when absent, transport failures, or an undecodable rules document
    pub async fn get_policy(&self, name: &str) -> Result<Policy> {
        if !self.has_policy(name).await? {
            return Err(VaultError::not_found("policy", name));
        }
        let rules = self.api().get_policy(name).await?;
        codec::decode(rules.as_bytes(), name)
    }

    /// Write `policy`, replacing any existing rules under its name
    ///
    /// Returns `true` when no policy of that name existed beforehand.
    ///
    /// # Errors
    /// Encoding, listing or write failures
    pub async fn set_policy(&self, policy: &Policy) -> Result<bool> {
        if policy.name.is_empty() {
            return Err(ValidationError::MissingPath { kind: "policy" }.into());
        }
        let existed = self.has_policy(&policy.name).await?;
        let encoded = codec::encode(policy)?;
        let rules = String::from_utf8_lossy(&encoded);

        self.api().put_policy(&policy.name, &rules).await?;
        if existed {
            debug!("Updated policy {}", policy.name);
        } else {
            metrics::increment_resources_created(ResourceKind::Policy.as_str());
            info!("Created policy {}", policy.name);
        }
        Ok(!existed)
    }

    /// Delete the policy called `name`
    ///
    /// # Errors
    /// `NotFound` when absent, or the delete failure
    pub async fn delete_policy(&self, name: &str) -> Result<()> {
        if !self.has_policy(name).await? {
            return Err(VaultError::not_found("policy", name));
        }
        self.api().delete_policy(name).await
    }
}
