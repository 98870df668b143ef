//! # Resource Descriptions
//!
//! Desired-state descriptions of Vault resources.
//!
//! These are plain caller-owned values. They are deserialized from descriptor
//! files (YAML or JSON, kebab-case keys), validated, reconciled and dropped.
//! Nothing here holds remote state.

use crate::attributes::Attributes;
use crate::duration::serde_duration;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A secret backend mounted at a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Backend {
    /// Mount point of the backend
    pub path: String,
    /// Backend type, one of `SUPPORTED_BACKEND_TYPES`
    #[serde(rename = "type")]
    pub backend_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "TimeDelta::zero", with = "serde_duration")]
    pub default_lease_ttl: TimeDelta,
    #[serde(default = "TimeDelta::zero", with = "serde_duration")]
    pub max_lease_ttl: TimeDelta,
    /// Configuration written below the mount, in order
    #[serde(default, rename = "attributes")]
    pub attrs: Vec<Attributes>,
}

impl Backend {
    /// A backend with zero lease TTLs and no attributes
    pub fn new(
        path: impl Into<String>,
        backend_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            backend_type: backend_type.into(),
            description: description.into(),
            default_lease_ttl: TimeDelta::zero(),
            max_lease_ttl: TimeDelta::zero(),
            attrs: Vec::new(),
        }
    }
}

/// An authentication method enabled at a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Auth {
    /// Mount path, without a trailing `/`
    pub path: String,
    /// Auth type, one of `SUPPORTED_AUTH_TYPES`
    #[serde(rename = "type")]
    pub auth_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "attributes")]
    pub attrs: Vec<Attributes>,
}

impl Auth {
    pub fn new(
        path: impl Into<String>,
        auth_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            auth_type: auth_type.into(),
            description: description.into(),
            attrs: Vec::new(),
        }
    }
}

/// A named set of path permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Name of the policy; the policy store does not echo it back
    #[serde(default)]
    pub name: String,
    /// Protected path to permission
    #[serde(default)]
    pub path: BTreeMap<String, PolicyPermission>,
}

/// Permission granted on a single path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPermission {
    pub policy: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
}

/// A service token to issue, or one returned by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserToken {
    /// Path of the token auth backend
    #[serde(default)]
    pub path: String,
    /// The token itself; empty lets the service generate one
    #[serde(default)]
    pub id: String,
    #[serde(default = "TimeDelta::zero", with = "serde_duration")]
    pub ttl: TimeDelta,
    #[serde(default)]
    pub display_name: String,
    /// Maximum number of uses, zero for unlimited
    #[serde(default)]
    pub max_uses: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Default for UserToken {
    fn default() -> Self {
        Self {
            path: String::new(),
            id: String::new(),
            ttl: TimeDelta::zero(),
            display_name: String::new(),
            max_uses: 0,
            policies: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Username and password for a userpass login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPass {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UserPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserPass")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Credentials used once to obtain a session token
///
/// A pre-issued token takes precedence over a username/password pair.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Mount path of the login backend (for `userpass`)
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub userpass: Option<UserPass>,
    #[serde(default)]
    pub usertoken: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("path", &self.path)
            .field("userpass", &self.userpass)
            .field("usertoken", &self.usertoken.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Credentials carrying an existing token
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            usertoken: Some(token.into()),
            ..Self::default()
        }
    }

    /// Credentials for a userpass login at `path`
    pub fn userpass(
        path: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            userpass: Some(UserPass {
                username: username.into(),
                password: password.into(),
            }),
            usertoken: None,
        }
    }
}

/// A generic secret written to a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub path: String,
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}
