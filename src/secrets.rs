//! # Generic Secrets
//!
//! Writes and removes key/value secrets through the generic request path.

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::error::{Result, ValidationError};
use crate::types::Secret;
use crate::validation::validate_secret;
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl<A: VaultApi> VaultClient<A> {
    /// Write the values of `secret` to its path, replacing what is there
    ///
    /// # Errors
    /// An empty path, or the write failure
    pub async fn set_secret(&self, secret: &Secret) -> Result<()> {
        validate_secret(secret)?;

        let body = Value::Object(
            secret
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );
        self.api()
            .request(Method::PUT, &secret.path, Some(&body))
            .await?;
        info!("Wrote secret {} ({} keys)", secret.path, secret.values.len());
        Ok(())
    }

    /// Delete the secret at `path`
    ///
    /// # Errors
    /// An empty path, or the delete failure
    pub async fn remove_secret(&self, path: &str) -> Result<()> {
        if path.trim_matches('/').is_empty() {
            return Err(ValidationError::MissingSecretPath.into());
        }
        self.api().request(Method::DELETE, path, None).await?;
        info!("Removed secret {}", path);
        Ok(())
    }
}
