//! # Desired State
//!
//! A document describing a whole Vault layout, applied in one pass:
//!
//! ```yaml
//! backends:
//!   - path: pki
//!     type: pki
//!     description: internal ca
//! auths:
//!   - path: userpass
//!     type: userpass
//!     description: operators
//! policies:
//!   - name: read-only
//!     path:
//!       "secret/*": { policy: read }
//! secrets:
//!   - path: secret/app
//!     values: { api-key: abc }
//! ```
//!
//! Every entry is validated before anything is sent. Entries are then applied
//! in the order backends, auths, policies, secrets, and the first failure stops
//! the pass.

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::error::{Result, ValidationError};
use crate::types::{Auth, Backend, Policy, Secret};
use crate::validation::{validate_auth, validate_backend, validate_secret};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, info_span, Instrument};

/// Resources to converge, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiredState {
    #[serde(default)]
    pub backends: Vec<Backend>,
    #[serde(default)]
    pub auths: Vec<Auth>,
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

impl DesiredState {
    /// Validate every entry without touching the network
    ///
    /// # Errors
    /// The first invalid entry
    pub fn validate(&self) -> Result<()> {
        for backend in &self.backends {
            validate_backend(backend)?;
        }
        for auth in &self.auths {
            validate_auth(auth)?;
        }
        if self.policies.iter().any(|p| p.name.is_empty()) {
            return Err(ValidationError::MissingPath { kind: "policy" }.into());
        }
        for secret in &self.secrets {
            validate_secret(secret)?;
        }
        Ok(())
    }

    /// Number of resources in the document
    #[must_use]
    pub fn len(&self) -> usize {
        self.backends.len() + self.auths.len() + self.policies.len() + self.secrets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What applying a single resource did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The resource did not exist and was created
    Created,
    /// The resource existed and was brought up to date
    Updated,
    /// The resource was written without tracking prior existence
    Applied,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Created => "created",
            Outcome::Updated => "updated",
            Outcome::Applied => "applied",
        })
    }
}

/// Result of applying one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub kind: &'static str,
    pub name: String,
    pub outcome: Outcome,
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.name, self.outcome)
    }
}

fn created_or_updated(created: bool) -> Outcome {
    if created {
        Outcome::Created
    } else {
        Outcome::Updated
    }
}

impl<A: VaultApi> VaultClient<A> {
    /// Converge every resource in `state`
    ///
    /// # Errors
    /// Validation of any entry before the first remote call, then the first
    /// failing resource
    pub async fn apply(&self, state: &DesiredState) -> Result<Vec<Applied>> {
        state.validate()?;

        let span = info_span!("state.apply", resources = state.len());
        async move {
            let mut applied = Vec::with_capacity(state.len());

            for backend in &state.backends {
                let created = self.mount_backend(backend).await?;
                applied.push(Applied {
                    kind: "backend",
                    name: backend.path.clone(),
                    outcome: created_or_updated(created),
                });
            }
            for auth in &state.auths {
                self.mount_auth(auth).await?;
                applied.push(Applied {
                    kind: "auth",
                    name: auth.path.clone(),
                    outcome: Outcome::Applied,
                });
            }
            for policy in &state.policies {
                let created = self.set_policy(policy).await?;
                applied.push(Applied {
                    kind: "policy",
                    name: policy.name.clone(),
                    outcome: created_or_updated(created),
                });
            }
            for secret in &state.secrets {
                self.set_secret(secret).await?;
                applied.push(Applied {
                    kind: "secret",
                    name: secret.path.clone(),
                    outcome: Outcome::Applied,
                });
            }

            info!("Applied {} resources", applied.len());
            Ok(applied)
        }
        .instrument(span)
        .await
    }
}
