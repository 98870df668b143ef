//! Auth method reconciliation

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::error::{Result, VaultError};
use crate::observability::metrics;
use crate::probe::{strip_separator, ResourceKind};
use crate::types::Auth;
use crate::validation::validate_auth;
use reqwest::Method;
use tracing::{debug, info, info_span, Instrument};

impl<A: VaultApi> VaultClient<A> {
    /// Ensure the auth method `auth` is enabled and configured
    ///
    /// Every attribute set is written on every call, `oneshot` or not.
    ///
    /// # Errors
    /// Validation failures before any remote call, then the first failing
    /// probe, enable or attribute write
    pub async fn mount_auth(&self, auth: &Auth) -> Result<()> {
        validate_auth(auth)?;

        let span = info_span!(
            "auth.mount",
            auth.path = %auth.path,
            auth.kind = %auth.auth_type
        );

        async move {
            if self.has_auth(&auth.path).await? {
                debug!("Auth method {} already enabled", auth.path);
            } else {
                self.api()
                    .enable_auth(&auth.path, &auth.auth_type, &auth.description)
                    .await?;
                metrics::increment_resources_created(ResourceKind::Auth.as_str());
                info!("Enabled {} auth method at {}", auth.auth_type, auth.path);
            }

            for (index, attrs) in auth.attrs.iter().enumerate() {
                self.write_attributes(&auth.path, index, attrs, Method::POST)
                    .await?;
            }

            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Disable the auth method at `path`
    ///
    /// # Errors
    /// `NotFound` when nothing is enabled there, or the disable failure
    pub async fn delete_auth(&self, path: &str) -> Result<()> {
        if !self.has_auth(path).await? {
            return Err(VaultError::not_found("auth", path));
        }
        self.api().disable_auth(strip_separator(path)).await?;
        info!("Disabled auth method {}", path);
        Ok(())
    }

    /// True when an auth method is enabled at `path`
    ///
    /// # Errors
    /// Listing failures
    pub async fn has_auth(&self, path: &str) -> Result<bool> {
        self.exists(ResourceKind::Auth, path).await
    }

    /// Paths of every enabled auth method, without the trailing separator
    ///
    /// # Errors
    /// Listing failures
    pub async fn list_auths(&self) -> Result<Vec<String>> {
        self.list(ResourceKind::Auth).await
    }
}
