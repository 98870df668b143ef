//! Secret backend reconciliation

use crate::api::{MountConfigInput, MountInput, VaultApi};
use crate::client::VaultClient;
use crate::duration::format_duration;
use crate::error::{Result, VaultError};
use crate::observability::metrics;
use crate::probe::{strip_separator, ResourceKind};
use crate::types::Backend;
use crate::validation::validate_backend;
use reqwest::Method;
use tracing::{debug, info, info_span, Instrument};

impl<A: VaultApi> VaultClient<A> {
    /// Ensure `backend` is mounted and configured
    ///
    /// Returns `true` when the mount was created by this call. Attribute sets
    /// marked `oneshot` are skipped when the backend already existed.
    ///
    /// # Errors
    /// Validation failures before any remote call, then the first failing
    /// probe, mount or attribute write
    pub async fn mount_backend(&self, backend: &Backend) -> Result<bool> {
        validate_backend(backend)?;

        let span = info_span!(
            "backend.mount",
            backend.path = %backend.path,
            backend.kind = %backend.backend_type
        );

        async move {
            let existed = self.has_backend(&backend.path).await?;

            if existed {
                debug!("Backend {} already mounted", backend.path);
            } else {
                let input = MountInput {
                    mount_type: backend.backend_type.clone(),
                    description: backend.description.clone(),
                    config: MountConfigInput {
                        default_lease_ttl: format_duration(backend.default_lease_ttl),
                        max_lease_ttl: format_duration(backend.max_lease_ttl),
                    },
                };
                self.api().mount(&backend.path, &input).await?;
                metrics::increment_resources_created(ResourceKind::Backend.as_str());
                info!("Mounted {} backend at {}", backend.backend_type, backend.path);
            }

            for (index, attrs) in backend.attrs.iter().enumerate() {
                if existed && attrs.is_oneshot() {
                    debug!(
                        "Skipping oneshot attribute set {} for existing backend {}",
                        index, backend.path
                    );
                    metrics::increment_attribute_skips();
                    continue;
                }
                self.write_attributes(&backend.path, index, attrs, Method::PUT)
                    .await?;
            }

            Ok(!existed)
        }
        .instrument(span)
        .await
    }

    /// Unmount the backend at `path`
    ///
    /// # Errors
    /// `NotFound` when no backend is mounted there, or the unmount failure
    pub async fn delete_backend(&self, path: &str) -> Result<()> {
        if !self.has_backend(path).await? {
            return Err(VaultError::not_found("backend", path));
        }
        self.api().unmount(strip_separator(path)).await?;
        info!("Unmounted backend {}", path);
        Ok(())
    }

    /// True when a backend is mounted at `path`
    ///
    /// # Errors
    /// Listing failures
    pub async fn has_backend(&self, path: &str) -> Result<bool> {
        self.exists(ResourceKind::Backend, path).await
    }

    /// Paths of every mounted backend, without the trailing separator
    ///
    /// # Errors
    /// Listing failures
    pub async fn list_mounts(&self) -> Result<Vec<String>> {
        self.list(ResourceKind::Backend).await
    }
}
