//! Response bodies of the Vault HTTP API

use crate::error::{Result, VaultError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Standard error body: `{"errors": ["..."]}`
#[derive(Debug, Deserialize)]
pub(crate) struct VaultErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// The secret envelope returned by most endpoints
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SecretEnvelope {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub auth: Option<SecretAuth>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SecretAuth {
    pub client_token: String,
}

/// `GET /v1/sys/policy`; newer servers also nest the list under `data`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PolicyListResponse {
    #[serde(default)]
    pub policies: Option<Vec<String>>,
    #[serde(default)]
    pub data: Option<PolicyListData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PolicyListData {
    #[serde(default)]
    pub policies: Option<Vec<String>>,
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

impl PolicyListResponse {
    pub fn into_names(self) -> Vec<String> {
        self.policies
            .or_else(|| {
                self.data
                    .and_then(|data| data.policies.or(data.keys))
            })
            .unwrap_or_default()
    }
}

/// `GET /v1/sys/policy/<name>`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PolicyResponse {
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub data: Option<PolicyData>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PolicyData {
    #[serde(default)]
    pub rules: Option<String>,
}

impl PolicyResponse {
    pub fn into_rules(self) -> Option<String> {
        self.rules.or_else(|| self.data.and_then(|data| data.rules))
    }
}

/// Extract the paths of a mount table (`/v1/sys/mounts` or `/v1/sys/auth`)
///
/// Older servers return the table at the top level next to response metadata,
/// newer ones also nest it under `data`. Only entries that describe a mount
/// (an object with a `type`) are kept.
pub(crate) fn mount_table_paths(body: Value) -> Result<Vec<String>> {
    let Value::Object(mut top) = body else {
        return Err(VaultError::Decode {
            field: "mounts",
            reason: "expected a JSON object".to_string(),
        });
    };
    let table = match top.remove("data") {
        Some(Value::Object(data)) => data,
        _ => top,
    };

    let mut paths: Vec<String> = table
        .into_iter()
        .filter(|(_, entry)| entry.get("type").is_some_and(Value::is_string))
        .map(|(path, _)| path)
        .collect();
    paths.sort();
    Ok(paths)
}
