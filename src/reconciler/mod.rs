//! # Reconciler
//!
//! Drives secret backends and auth methods toward their desired state.
//!
//! Every entry point follows the same flow:
//!
//! 1. Validate the description (no network traffic on failure)
//! 2. Probe whether the resource already exists
//! 3. Create it when absent
//! 4. Write its attribute sets, in declaration order
//!
//! Backends and auth methods differ in step 4: backend attribute sets marked
//! `oneshot` are only written when the mount was just created, while auth
//! attribute sets are written on every call. The first failing write aborts the
//! call and earlier writes stay applied.
//!
//! The probe-then-act sequence is not atomic. A concurrent writer can create the
//! resource between the probe and the create, in which case the create fails
//! with whatever the service reports.

mod auth;
mod backend;

use crate::api::VaultApi;
use crate::attributes::Attributes;
use crate::client::VaultClient;
use crate::error::Result;
use crate::observability::metrics;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

impl<A: VaultApi> VaultClient<A> {
    /// Write one attribute set below `mount`, using `method`
    pub(crate) async fn write_attributes(
        &self,
        mount: &str,
        index: usize,
        attrs: &Attributes,
        method: Method,
    ) -> Result<()> {
        let path = attrs.path_under(mount);
        debug!("Writing attribute set {} to {}", index, path);

        let body = Value::Object(
            attrs
                .values()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        match self.api().request(method, &path, Some(&body)).await {
            Ok(_) => {
                metrics::increment_attribute_writes();
                Ok(())
            }
            Err(e) => {
                warn!("Failed to write attribute set {} to {}: {}", index, path, e);
                Err(e)
            }
        }
    }
}
