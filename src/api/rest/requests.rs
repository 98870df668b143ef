//! Request bodies for the Vault HTTP API

use serde::Serialize;
use std::collections::BTreeMap;

/// Body of `POST /v1/sys/mounts/<path>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountInput {
    #[serde(rename = "type")]
    pub mount_type: String,
    pub description: String,
    pub config: MountConfigInput,
}

/// Lease settings of a mount, as duration strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountConfigInput {
    pub default_lease_ttl: String,
    pub max_lease_ttl: String,
}

/// Body of `POST /v1/sys/auth/<path>`
#[derive(Debug, Serialize)]
pub(crate) struct EnableAuthRequest<'a> {
    #[serde(rename = "type")]
    pub auth_type: &'a str,
    pub description: &'a str,
}

/// Body of `PUT /v1/sys/policy/<name>`
#[derive(Debug, Serialize)]
pub(crate) struct PutPolicyRequest<'a> {
    pub rules: &'a str,
}

/// Body of `POST /v1/auth/token/create`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenCreateRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ttl: String,
    pub display_name: String,
    pub num_uses: u64,
}

/// Body of `POST /v1/auth/token/lookup`
#[derive(Debug, Serialize)]
pub(crate) struct TokenLookupRequest<'a> {
    pub token: &'a str,
}

/// Body of `POST /v1/<auth path>/login/<username>`
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub password: &'a str,
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest").finish_non_exhaustive()
    }
}
