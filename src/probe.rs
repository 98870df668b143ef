//! # Existence Probing
//!
//! Answers "is this resource already there?" by listing every resource of a
//! kind and testing membership by exact match. Nothing is cached: each probe
//! is a fresh listing call, and listing errors are returned unchanged.
//!
//! Mount tables report paths with a trailing separator (`secret/`), so mount
//! and auth identifiers are compared with it stripped.

use crate::api::VaultApi;
use crate::client::VaultClient;
use crate::error::Result;
use std::fmt;
use tracing::debug;

/// Kinds of resources whose existence can be probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Backend,
    Auth,
    Policy,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Backend => "backend",
            ResourceKind::Auth => "auth",
            ResourceKind::Policy => "policy",
        }
    }

    fn is_mount_table(self) -> bool {
        matches!(self, ResourceKind::Backend | ResourceKind::Auth)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop the trailing separator the remote service appends to mount paths
pub(crate) fn strip_separator(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

pub(crate) fn strip_all(paths: Vec<String>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| strip_separator(&p).to_string())
        .collect()
}

impl<A: VaultApi> VaultClient<A> {
    /// Identifiers of every resource of `kind`
    ///
    /// # Errors
    /// Any listing failure, unchanged
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<String>> {
        let listed = match kind {
            ResourceKind::Backend => self.api().list_mounts().await?,
            ResourceKind::Auth => self.api().list_auth().await?,
            ResourceKind::Policy => return self.api().list_policies().await,
        };
        Ok(strip_all(listed))
    }

    /// True when a resource of `kind` named `identifier` exists remotely
    ///
    /// # Errors
    /// Any listing failure, unchanged
    pub async fn exists(&self, kind: ResourceKind, identifier: &str) -> Result<bool> {
        let wanted = if kind.is_mount_table() {
            strip_separator(identifier)
        } else {
            identifier
        };
        let found = self.list(kind).await?.iter().any(|item| item == wanted);
        debug!("Probed {} {}: exists={}", kind, identifier, found);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_separator() {
        assert_eq!(strip_separator("secret/"), "secret");
        assert_eq!(strip_separator("secret"), "secret");
        assert_eq!(strip_separator("a/b/"), "a/b");
        assert_eq!(
            strip_all(vec!["sys/".to_string(), "pki".to_string()]),
            vec!["sys", "pki"]
        );
    }
}
