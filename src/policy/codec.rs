//! # Policy Codec
//!
//! Converts a `Policy` to and from the rules document the policy store keeps:
//!
//! ```json
//! {"path": {"secret/*": {"policy": "read", "capabilities": ["read", "list"]}}}
//! ```
//!
//! The document carries no name. The store keys policies by name, so the name
//! is supplied on decode.

use crate::error::Result;
use crate::types::{Policy, PolicyPermission};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize)]
struct RulesRef<'a> {
    path: &'a BTreeMap<String, PolicyPermission>,
}

#[derive(Deserialize)]
struct RulesOwned {
    #[serde(default)]
    path: BTreeMap<String, PolicyPermission>,
}

/// Serialize the path map of `policy`; the name is not written
///
/// # Errors
/// Serialization failures
pub fn encode(policy: &Policy) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&RulesRef { path: &policy.path })?)
}

/// Parse a rules document into a `Policy` called `name`
///
/// A document without a `path` key decodes to an empty map.
///
/// # Errors
/// Malformed JSON or a `path` entry of the wrong shape
pub fn decode(data: &[u8], name: &str) -> Result<Policy> {
    let rules: RulesOwned = serde_json::from_slice(data)?;
    Ok(Policy {
        name: name.to_string(),
        path: rules.path,
    })
}
